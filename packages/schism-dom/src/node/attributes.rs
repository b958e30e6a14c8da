use std::ops::{Deref, DerefMut};

use markup5ever::{LocalName, QualName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The name of the attribute (e.g. the `class` in `<div class="test">`)
    pub name: QualName,
    /// The value of the attribute (e.g. the `"test"` in `<div class="test">`)
    pub value: String,
}

impl Attribute {
    /// An attribute in the null namespace, which is where HTML attributes live
    pub fn new(local: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, markup5ever::ns!(), LocalName::from(local)),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    inner: Vec<Attribute>,
}

impl Attributes {
    pub fn new(inner: Vec<Attribute>) -> Self {
        Self { inner }
    }

    pub fn get(&self, local: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|attr| &*attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute's value, appending it if not already present.
    /// Existing attributes keep their position.
    pub fn set(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        match self.inner.iter_mut().find(|attr| &*attr.name.local == local) {
            Some(existing) => existing.value = value,
            None => self.inner.push(Attribute::new(local, value)),
        }
    }

    pub fn remove(&mut self, local: &str) -> Option<Attribute> {
        let idx = self
            .inner
            .iter()
            .position(|attr| &*attr.name.local == local)?;
        Some(self.inner.remove(idx))
    }
}

impl Deref for Attributes {
    type Target = Vec<Attribute>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Attributes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut attrs = Attributes::new(vec![Attribute::new("id", "a"), Attribute::new("class", "x")]);
        attrs.set("id", "b");
        attrs.set("style", "display: none;");

        let names: Vec<&str> = attrs.iter().map(|a| &*a.name.local).collect();
        assert_eq!(names, ["id", "class", "style"]);
        assert_eq!(attrs.get("id"), Some("b"));
    }

    #[test]
    fn remove_returns_the_attribute() {
        let mut attrs = Attributes::new(vec![Attribute::new("id", "a")]);
        assert_eq!(attrs.remove("id").map(|a| a.value), Some("a".to_string()));
        assert!(attrs.remove("id").is_none());
        assert!(attrs.is_empty());
    }
}
