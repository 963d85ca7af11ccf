use egui::{FontData, FontDefinitions, FontFamily, TextStyle};

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font name must not be empty")]
    EmptyName,
    #[error("font {name} is not a valid TrueType/OpenType face: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ttf_parser::FaceParsingError,
    },
}

/// Font definitions accumulated over the life of a context.
///
/// egui replaces its whole font set on every `set_fonts`, so each backend
/// keeps the running set here and hands out a fresh copy when it changes.
#[derive(Clone, Default)]
pub struct FontRegistry {
    definitions: FontDefinitions,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font selectable as `FontFamily::Name(name)`.
    pub fn register(&mut self, name: &str, bytes: Vec<u8>) -> Result<FontFamily, FontError> {
        if name.is_empty() {
            return Err(FontError::EmptyName);
        }
        if let Err(source) = ttf_parser::Face::parse(&bytes, 0) {
            return Err(FontError::Invalid {
                name: name.to_string(),
                source,
            });
        }

        self.definitions
            .font_data
            .insert(name.to_string(), FontData::from_owned(bytes).into());

        let family = FontFamily::Name(name.into());
        let mut fonts = vec![name.to_string()];
        // fall back to the stock faces for glyphs the new font lacks
        if let Some(stock) = self.definitions.families.get(&FontFamily::Proportional) {
            fonts.extend(stock.iter().filter(|font| *font != name).cloned());
        }
        self.definitions.families.insert(family.clone(), fonts);

        tracing::debug!("registered font {name}");
        Ok(family)
    }

    /// Register a font and make it the first choice for all text.
    pub fn set_default(&mut self, name: &str, bytes: Vec<u8>) -> Result<FontFamily, FontError> {
        let family = self.register(name, bytes)?;
        for stock in [FontFamily::Proportional, FontFamily::Monospace] {
            let fonts = self.definitions.families.entry(stock).or_default();
            fonts.retain(|font| font != name);
            fonts.insert(0, name.to_string());
        }
        Ok(family)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.font_data.contains_key(name)
    }

    pub fn definitions(&self) -> FontDefinitions {
        self.definitions.clone()
    }
}

/// Scale every text style so body text is `size` points.
pub fn apply_font_size(ctx: &egui::Context, size: f32) {
    if !(size.is_finite() && size > 0.0) {
        tracing::warn!("ignoring font size {size}");
        return;
    }

    let defaults = egui::Style::default().text_styles;
    let Some(body) = defaults.get(&TextStyle::Body) else {
        return;
    };
    let scale = size / body.size;
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            if let Some(base) = defaults.get(text_style) {
                font_id.size = base.size * scale;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_font_bytes() -> Vec<u8> {
        let defaults = FontDefinitions::default();
        let (_, data) = defaults
            .font_data
            .iter()
            .next()
            .expect("egui ships default fonts");
        data.font.to_vec()
    }

    #[test]
    fn test_register_named_family() {
        let mut registry = FontRegistry::new();
        let family = registry.register("mono-ish", stock_font_bytes()).unwrap();

        assert_eq!(family, FontFamily::Name("mono-ish".into()));
        assert!(registry.contains("mono-ish"));
        let fonts = &registry.definitions().families[&family];
        assert_eq!(fonts[0], "mono-ish");
    }

    #[test]
    fn test_set_default_goes_first() {
        let mut registry = FontRegistry::new();
        registry.set_default("main", stock_font_bytes()).unwrap();
        let definitions = registry.definitions();
        assert_eq!(definitions.families[&FontFamily::Proportional][0], "main");
        assert_eq!(definitions.families[&FontFamily::Monospace][0], "main");
    }

    #[test]
    fn test_rejects_invalid_data() {
        let mut registry = FontRegistry::new();
        let err = registry.register("broken", vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, FontError::Invalid { .. }));
        assert!(!registry.contains("broken"));
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut registry = FontRegistry::new();
        assert!(matches!(
            registry.register("", stock_font_bytes()),
            Err(FontError::EmptyName)
        ));
    }

    #[test]
    fn test_font_size_scales_body() {
        let ctx = egui::Context::default();
        apply_font_size(&ctx, 25.0);
        let body = ctx.style().text_styles[&TextStyle::Body].size;
        assert!((body - 25.0).abs() < 1e-3);
    }
}
