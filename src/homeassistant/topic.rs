use crate::{
    constants::{CONFIG_TOPIC, STATE_TOPIC},
    error::{Error, Result},
    util::is_valid_id,
};

use super::entity::EntityIdentity;

const UNIQUE_ID_SEPARATOR: &str = ".";

/// Topics of a single entity, following the discovery scheme
/// `<prefix>/<component>/<node_id>/<object_id>[/<child_object_id>]/{config,state}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSet {
    pub config: String,
    pub state: String,
}

impl TopicSet {
    pub fn new(
        discovery_prefix: &str,
        component: &str,
        node_id: &str,
        identity: &EntityIdentity,
    ) -> Result<Self> {
        validate_ids(node_id, identity)?;

        let mut base = format!(
            "{}/{}/{}/{}",
            discovery_prefix, component, node_id, identity.object_id
        );
        if let Some(child_object_id) = &identity.child_object_id {
            base.push('/');
            base.push_str(child_object_id);
        }

        Ok(Self {
            config: format!("{}/{}", base, CONFIG_TOPIC),
            state: format!("{}/{}", base, STATE_TOPIC),
        })
    }
}

/// Id stable across restarts, so the hub keeps recognizing the entity.
///
/// Segments are joined with `.`, which never appears inside a valid id.
pub fn unique_id(component: &str, node_id: &str, identity: &EntityIdentity) -> String {
    let mut segments = vec![node_id, component, identity.object_id.as_str()];
    if let Some(child) = &identity.child_object_id {
        segments.push(child);
    }
    segments.join(UNIQUE_ID_SEPARATOR)
}

fn validate_ids(node_id: &str, identity: &EntityIdentity) -> Result<()> {
    if !is_valid_id(node_id) {
        return Err(Error::InvalidNodeId(node_id.into()));
    }
    if !is_valid_id(&identity.object_id) {
        return Err(Error::InvalidObjectId(identity.object_id.clone()));
    }
    match &identity.child_object_id {
        Some(child) if !is_valid_id(child) => Err(Error::InvalidChildObjectId(child.clone())),
        _ => Ok(()),
    }
}
