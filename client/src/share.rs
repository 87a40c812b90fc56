//! Shareable public profile links

use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcode::{render::svg, QrCode};

/// Public URL of a business page and its QR encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub url: String,
    /// SVG markup, absent if the URL could not be encoded
    pub qr_svg: Option<String>,
}

impl ShareLink {
    pub fn for_profile(public_url: &str, profile_id: i64) -> Self {
        let url = format!("{}/business/{}", public_url.trim_end_matches('/'), profile_id);

        let qr_svg = match QrCode::new(url.as_bytes()) {
            Ok(code) => Some(
                code.render::<svg::Color>()
                    .min_dimensions(240, 240)
                    .dark_color(svg::Color("#000000"))
                    .light_color(svg::Color("#FFFFFF"))
                    .build(),
            ),
            Err(e) => {
                tracing::warn!("QR generation failed for {}: {}", url, e);
                None
            }
        };

        Self { url, qr_svg }
    }

    /// `data:` URI that an `<img>` tag can display directly
    pub fn qr_data_uri(&self) -> Option<String> {
        self.qr_svg
            .as_ref()
            .map(|svg| format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes())))
    }
}
