/// Ordered string key/value pairs attached to an entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentProperties {
    pub pairs: Vec<(String, String)>,
}

impl ComponentProperties {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentProperties;

    #[test]
    fn get_returns_first_match() {
        let props = ComponentProperties::default()
            .with("name", "Harbor")
            .with("name", "Shadowed");
        assert_eq!(props.get("name"), Some("Harbor"));
        assert_eq!(props.get("missing"), None);
    }
}
