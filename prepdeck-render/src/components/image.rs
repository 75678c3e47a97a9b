//! Chart and figure images.

use prepdeck_core::lesson::Image;

use crate::context::RenderContext;
use crate::escape::escape_attr;

/// Render an image as a `<figure>`, with a caption when one is given.
pub fn render_image(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, image: &Image) {
    let mut attrs = vec![
        format!("src=\"{}\"", escape_attr(&image.src)),
        format!("alt=\"{}\"", escape_attr(image.alt.trim())),
    ];
    if let Some(width) = image.width {
        attrs.push(format!("width=\"{width}\""));
    }
    if let Some(height) = image.height {
        attrs.push(format!("height=\"{height}\""));
    }
    attrs.push("loading=\"lazy\"".to_string());

    out.push("<figure class=\"lesson-image\">".to_string());
    out.push(format!("<img {}>", attrs.join(" ")));
    if let Some(caption) = &image.caption {
        out.push(format!("<figcaption>{}</figcaption>", ctx.inline(caption)));
    }
    out.push("</figure>".to_string());
}
