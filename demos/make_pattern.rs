//! Solve a pattern source and print its `.pat` text.
//!
//! ```text
//! RUST_LOG=patmaker=debug cargo run --example make_pattern --features tracing -- tests/patterns/dashes.hatch
//! ```

use miette::IntoDiagnostic;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (name, source) = match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path).into_diagnostic()?;
            (path, source)
        }
        None => (
            "<builtin>".to_string(),
            "pattern \"Diagonal\"\ndomain 1, 1\nline (0, 0) to (1, 1)\n".to_string(),
        ),
    };

    let output = patmaker::make_pattern_named(&name, &source)?;
    for axis in &output.result.axes {
        tracing::info!(%axis, jiggles = axis.jiggle_count(), "axis");
    }
    for failure in &output.result.failures {
        eprintln!(
            "line {} ({}) dropped: {}",
            failure.index,
            failure.label.as_deref().unwrap_or("unlabelled"),
            failure.error
        );
    }
    print!("{}", output.definition);
    Ok(())
}
