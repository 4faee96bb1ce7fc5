use eframe::egui::Color32;

/// Colors and type scale for the preview window.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color32,
    /// Body copy.
    pub foreground: Color32,
    pub heading_color: Color32,
    /// Links, active indicators and hovered controls.
    pub accent: Color32,
    /// Slideshow frame and toast backdrop.
    pub surface: Color32,
    pub error: Color32,
    pub success: Color32,
    pub indicator_idle: Color32,
    pub hero_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

const HERO_SIZE: f32 = 44.0;
const HEADING_SIZE: f32 = 30.0;
const BODY_SIZE: f32 = 18.0;
const SMALL_SIZE: f32 = 13.0;

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color32::from_rgb(0xFA, 0xFA, 0xF7),
            foreground: Color32::from_rgb(0x33, 0x33, 0x33),
            heading_color: Color32::from_rgb(0x11, 0x11, 0x11),
            accent: Color32::from_rgb(0xE8, 0x5D, 0x04),
            surface: Color32::from_rgb(0xEE, 0xEC, 0xE6),
            error: Color32::from_rgb(0xDC, 0x35, 0x45),
            success: Color32::from_rgb(0x28, 0xA7, 0x45),
            indicator_idle: Color32::from_rgb(0xC4, 0xC1, 0xB8),
            hero_size: HERO_SIZE,
            heading_size: HEADING_SIZE,
            body_size: BODY_SIZE,
            small_size: SMALL_SIZE,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color32::from_rgb(0x12, 0x12, 0x14),
            foreground: Color32::from_rgb(0xD4, 0xD4, 0xD0),
            heading_color: Color32::from_rgb(0xF5, 0xF5, 0xF2),
            accent: Color32::from_rgb(0xFF, 0x8A, 0x3D),
            surface: Color32::from_rgb(0x22, 0x22, 0x26),
            error: Color32::from_rgb(0xFF, 0x6B, 0x6B),
            success: Color32::from_rgb(0x51, 0xCF, 0x66),
            indicator_idle: Color32::from_rgb(0x4A, 0x4A, 0x50),
            ..Self::light()
        }
    }

    /// Unknown names fall back to the light palette.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn toggled(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// `color` with its alpha scaled to `opacity` (clamped to 0..=1).
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("DARK").name, "dark");
        assert_eq!(Theme::from_name("sepia").name, "light");
    }

    #[test]
    fn test_toggled_round_trips() {
        let light = Theme::light();
        assert_eq!(light.toggled().name, "dark");
        assert_eq!(light.toggled().toggled(), light);
    }

    #[test]
    fn test_with_opacity_clamps() {
        let c = Color32::from_rgb(10, 20, 30);
        assert_eq!(Theme::with_opacity(c, 2.0).a(), 255);
        assert_eq!(Theme::with_opacity(c, -1.0).a(), 0);
    }
}
