use crate::paragraph::ParagraphStyle;
use std::collections::HashMap;
use std::sync::Arc;

/// Named paragraph styles, built once and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: HashMap<String, Arc<ParagraphStyle>>,
    fallback: Arc<ParagraphStyle>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(ParagraphStyle::default())
    }
}

impl StyleRegistry {
    /// Creates an empty registry whose lookups fall back to `fallback`.
    pub fn new(fallback: ParagraphStyle) -> Self {
        Self {
            styles: HashMap::new(),
            fallback: Arc::new(fallback),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, style: ParagraphStyle) -> Arc<ParagraphStyle> {
        let style = Arc::new(style);
        self.styles.insert(name.into(), style.clone());
        style
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ParagraphStyle>> {
        self.styles.get(name)
    }

    /// Looks up a style, falling back to the registry default for unknown names.
    pub fn resolve(&self, name: &str) -> Arc<ParagraphStyle> {
        match self.styles.get(name) {
            Some(style) => style.clone(),
            None => {
                log::debug!("Unknown paragraph style '{}', using fallback", name);
                self.fallback.clone()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_and_unknown_names() {
        let mut registry = StyleRegistry::new(ParagraphStyle::sized(8.0));
        registry.register("title", ParagraphStyle::sized(24.0).bold());

        assert_eq!(registry.resolve("title").font_size, 24.0);
        assert_eq!(registry.resolve("missing").font_size, 8.0);
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registered_styles_are_shared() {
        let mut registry = StyleRegistry::default();
        let style = registry.register("cell", ParagraphStyle::sized(8.0));
        assert!(Arc::ptr_eq(&style, &registry.resolve("cell")));
    }
}
