//! QR code encoding
//!
//! Order numbers are encoded as SVG so they stay sharp at any label size.

use qrcode::render::svg;
use qrcode::QrCode;

use crate::compiler::RenderError;

/// Encode `payload` as an SVG QR code
///
/// One SVG unit is one module. `border` is the width of the white quiet zone
/// in modules; zero draws the code edge to edge.
pub fn encode_svg(payload: &str, border: u32) -> Result<String, RenderError> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| RenderError::QrError(payload.to_string(), e.to_string()))?;

    let modules = code.width() as u32;
    let bare = code
        .render::<svg::Color>()
        .quiet_zone(false)
        .module_dimensions(1, 1)
        .build();
    if border == 0 {
        return Ok(bare);
    }

    // Nest the bare code, minus its XML declaration, inside a padded canvas
    let inner = bare.find("<svg").map_or(bare.as_str(), |start| &bare[start..]);
    let size = modules + 2 * border;
    Ok(format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{size}" viewBox="0 0 {size} {size}" shape-rendering="crispEdges"><rect width="{size}" height="{size}" fill="#fff"/><g transform="translate({border} {border})">{inner}</g></svg>"##
    ))
}
