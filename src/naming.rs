use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// Renders output file names from minijinja patterns.
pub struct NameRenderer {
    env: Environment<'static>,
}

impl NameRenderer {
    /// Creates a renderer that rejects undefined variables.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Renders `pattern` with the given context.
    pub fn render<T: Serialize>(&self, pattern: &str, context: &T) -> Result<String, String> {
        let rendered = self
            .env
            .render_str(pattern, context)
            .map_err(|e| format!("{} (pattern: {:?})", e, pattern))?;

        if rendered.is_empty() || rendered.contains(['/', '\\']) {
            return Err(format!("not a plain file name: {:?}", rendered));
        }
        Ok(rendered)
    }
}

impl Default for NameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_render_split_pattern() {
        let renderer = NameRenderer::new();
        let context = HashMap::from([("line", "7"), ("timestamp", "20261019_101500")]);
        let name = renderer
            .render("line_{{ line }}_{{ timestamp }}.csv", &context)
            .unwrap();
        assert_eq!(name, "line_7_20261019_101500.csv");
    }

    #[test]
    fn test_render_undefined_variable() {
        let renderer = NameRenderer::new();
        let context: HashMap<String, String> = HashMap::new();
        assert!(renderer.render("line_{{ missing }}.csv", &context).is_err());
    }

    #[test]
    fn test_render_rejects_path_separators() {
        let renderer = NameRenderer::new();
        let context = HashMap::from([("line", "../escape")]);
        assert!(renderer.render("{{ line }}.csv", &context).is_err());
    }
}
