use axum::response::Html;
use handlebars::{Handlebars, handlebars_helper};
use rust_embed::RustEmbed;
use serde::Serialize;
use tracing::debug;

use super::ApiError;

#[derive(RustEmbed)]
#[folder = "templates"]
struct TemplateFiles;

/// Page renderer over the embedded Handlebars templates.
///
/// Each `name.hbs` file is registered as `name`, so the layout pieces are
/// usable as partials (`{{> header}}`).
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn load() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        register_helpers(&mut registry);

        for file in TemplateFiles::iter() {
            let Some(name) = file.strip_suffix(".hbs") else {
                continue;
            };
            let Some(content) = TemplateFiles::get(&file) else {
                continue;
            };
            let source = std::str::from_utf8(&content.data)
                .map_err(|e| anyhow::anyhow!("Template {file} is not UTF-8: {e}"))?;
            registry
                .register_template_string(name, source)
                .map_err(|e| anyhow::anyhow!("Failed to parse template {file}: {e}"))?;
            debug!("Registered template {}", name);
        }

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<Html<String>, ApiError> {
        Ok(Html(self.registry.render(name, context)?))
    }

    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

fn register_helpers(registry: &mut Handlebars<'static>) {
    handlebars_helper!(urlencode: |s: String| urlencoding::encode(&s).into_owned());
    registry.register_helper("urlencode", Box::new(urlencode));

    handlebars_helper!(stringeq: |s1: String, s2: String| s1.eq(&s2));
    registry.register_helper("stringeq", Box::new(stringeq));

    handlebars_helper!(stars: |rating: f64| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full = rating.round().clamp(0.0, 5.0) as usize;
        format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
    });
    registry.register_helper("stars", Box::new(stars));

    handlebars_helper!(budget_label: |level: u64| match level {
        1 => "$",
        2 => "$$",
        _ => "$$$",
    });
    registry.register_helper("budget_label", Box::new(budget_label));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_pages_are_registered() {
        let templates = Templates::load().unwrap();
        for page in ["index", "results", "history", "favorites", "plans", "country"] {
            assert!(templates.has_template(page), "missing template {page}");
        }
    }

    #[test]
    fn helpers_render() {
        let mut registry = Handlebars::new();
        register_helpers(&mut registry);

        let out = registry
            .render_template(
                "/country/{{urlencode name}} {{stars rating}} {{budget_label level}}",
                &json!({"name": "Новая Зеландия", "rating": 4.4, "level": 2}),
            )
            .unwrap();
        assert_eq!(
            out,
            "/country/%D0%9D%D0%BE%D0%B2%D0%B0%D1%8F%20%D0%97%D0%B5%D0%BB%D0%B0%D0%BD%D0%B4%D0%B8%D1%8F ★★★★☆ $$"
        );
    }
}
