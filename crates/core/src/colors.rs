//! Terminal styling for target identifiers

use colored::{Color, ColoredString, Colorize};

use crate::registry::Target;

/// Phony targets are cyan, file-backed targets are magenta
pub fn target_color(target: &Target) -> Color {
    if target.phony {
        Color::Cyan
    } else {
        Color::Magenta
    }
}

/// Identifier styled by kind; file-backed targets with a separate output show it
pub fn styled_target(target: &Target) -> ColoredString {
    let label = match (&target.output, target.phony) {
        (Some(output), false) => format!("{} ({})", target.identifier, output.display()),
        _ => target.identifier.clone(),
    };
    label.color(target_color(target))
}
