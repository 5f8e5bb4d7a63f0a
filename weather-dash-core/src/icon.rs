const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// The two image sizes the icon host serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Primary conditions panel.
    Large,
    /// Daily forecast cards.
    Small,
}

pub fn icon_url(icon: &str, size: IconSize) -> String {
    match size {
        IconSize::Large => format!("{ICON_BASE_URL}/{icon}@2x.png"),
        IconSize::Small => format!("{ICON_BASE_URL}/{icon}.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_icon_uses_2x_variant() {
        assert_eq!(
            icon_url("10d", IconSize::Large),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn small_icon_uses_plain_variant() {
        assert_eq!(
            icon_url("01n", IconSize::Small),
            "https://openweathermap.org/img/wn/01n.png"
        );
    }
}
