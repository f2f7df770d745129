use super::Label;
use plotters::style::RGBColor;

// named colors as the usual plotting defaults render them
pub const BLACK: RGBColor = RGBColor(0, 0, 0);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);
pub const RED: RGBColor = RGBColor(255, 0, 0);
pub const BLUE: RGBColor = RGBColor(0, 0, 255);
pub const GREY: RGBColor = RGBColor(128, 128, 128);

/// What a bar or a piece of text is colored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// plain annotation text
    Text,
    /// the faster bar, or a release that got faster
    Faster,
    Slower,
    /// neither bar is faster
    Even,
    /// identity of a build in a grouped chart
    Build(Label),
}

impl Ink {
    pub fn rgb(&self) -> RGBColor {
        match self {
            Ink::Text => BLACK,
            Ink::Faster => GREEN,
            Ink::Slower => RED,
            Ink::Even => GREY,
            Ink::Build(Label::Playstore) => BLUE,
            Ink::Build(Label::Release) => GREEN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ink::Text => "black",
            Ink::Faster => "green",
            Ink::Slower => "red",
            Ink::Even => "grey",
            Ink::Build(Label::Playstore) => "blue",
            Ink::Build(Label::Release) => "green",
        }
    }
}
