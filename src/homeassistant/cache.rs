/// Last payload published on a state topic.
///
/// Comparison is plain string equality: any change in the serialized form
/// is a change, anything below print precision is not. Only kept in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValueCache {
    last: Option<String>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing was recorded yet or `candidate` differs from the last value.
    pub fn should_publish(&self, candidate: &str) -> bool {
        self.last.as_deref() != Some(candidate)
    }

    pub fn record(&mut self, payload: String) {
        self.last = Some(payload);
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
