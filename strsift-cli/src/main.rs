use std::io;
use std::process::exit;

use strsift::{load_pattern_file, process_patterns, Corpus, StringExtractor, StringsTool};

mod args;
mod output;

use args::{build_command, Options};
use output::Renderer;

fn main() -> Result<(), io::Error> {
    let options = Options::from_args(build_command().get_matches());
    let mut renderer = Renderer::new(options.color);

    if !options.file.exists() {
        renderer.error(&format!(
            "Error: target file `{}` not found",
            options.file.display()
        ))?;
        exit(1);
    }
    if !options.json.exists() {
        renderer.error(&format!(
            "Error: pattern file `{}` not found",
            options.json.display()
        ))?;
        exit(1);
    }

    // The pattern file is parsed before spawning the extraction program,
    // so a broken document fails fast.
    let groups = match load_pattern_file(&options.json) {
        Ok(groups) => groups,
        Err(err) => {
            renderer.error(&format!(
                "Cannot load patterns from {}: {err}",
                options.json.display()
            ))?;
            exit(1);
        }
    };

    renderer.banner(&options.file, &options.json)?;

    renderer.info("Extracting strings from the binary file...")?;
    let extracted = match StringsTool::new().extract(&options.file) {
        Ok(strings) => strings,
        Err(err) => {
            renderer.error(&format!("Cannot extract strings: {err}"))?;
            exit(1);
        }
    };
    renderer.success(&format!("✓ {} strings extracted", extracted.len()))?;

    renderer.info("Checking and decoding base64 strings...")?;
    let corpus = Corpus::expand(extracted);
    if corpus.decoded_count() > 0 {
        renderer.success(&format!(
            "✓ {} base64 string(s) decoded",
            corpus.decoded_count()
        ))?;
    } else {
        renderer.info("No valid base64 strings found")?;
    }

    let (reports, summary) = process_patterns(&groups, &corpus, options.max_results);
    for report in &reports {
        renderer.group(report)?;
    }
    renderer.summary(&summary)?;

    Ok(())
}
