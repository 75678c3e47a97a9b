//! Formula preview.

use prepdeck_render::{Formula, MathEngine, MathRenderer};

use crate::cli::args::MathArgs;
use crate::error::PrepdeckError;

/// Execute `math`: print the wrapped HTML for one formula.
///
/// # Errors
///
/// With `--check`, returns `RenderError::Math` if the formula does not
/// parse.
pub fn run(args: &MathArgs) -> Result<(), PrepdeckError> {
    let renderer = MathRenderer::katex();
    if args.check {
        renderer.engine().check(&args.expr, args.display)?;
    }

    let mut formula = if args.display {
        Formula::block(&args.expr)
    } else {
        Formula::inline(&args.expr)
    };
    if let Some(label) = &args.label {
        formula = formula.with_label(label);
    }

    println!("{}", renderer.render(&formula));
    Ok(())
}
