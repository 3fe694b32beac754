use std::env;
use toknorm::pipeline::{self, output};
use toknorm::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration and table coherence
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <tokens.json> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);

    process_single_file(&args[1], &options)
}

#[derive(Debug, Default)]
struct OutputOptions {
    /// Emit the token stream as JSON instead of the line-oriented form
    json: bool,
    /// Suppress the success banner
    quiet: bool,
}

fn parse_options(args: &[String]) -> OutputOptions {
    let mut options = OutputOptions::default();

    for arg in args {
        match arg.as_str() {
            "--json" => options.json = true,
            "--quiet" => options.quiet = true,
            _ => {
                eprintln!("Warning: Unknown option '{}'", arg);
            }
        }
    }

    options
}

fn print_help(program_name: &str) {
    println!("toknorm v{}", env!("CARGO_PKG_VERSION"));
    println!("Canonical token stream normalizer for Ripper-style Ruby lexer output");
    println!();
    println!("USAGE:");
    println!("    {} <tokens.json> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <tokens.json>  Serialized raw token stream: a JSON array of");
    println!("                   [[line, column], category, text] records");
    println!();
    println!("OPTIONS:");
    println!("    --help         Show this help message");
    println!("    --json         Emit canonical tokens as JSON");
    println!("    --quiet        Suppress the success banner");
    println!();
    println!("OUTPUT:");
    println!("    One canonical token per line: <kind> [bytes] <line>:<column>");
    println!("    The byte value is omitted for kinds that carry none.");
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
}

fn process_single_file(
    file_path: &str,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("{}", file_path);

    match pipeline::process_file(file_path) {
        Ok(result) => {
            let token_count = result.token_count();
            if options.json {
                let machine_output = toknorm::PipelineOutput::new(result.tokens);
                println!("{}", machine_output.to_json()?);
            } else {
                print!("{}", output::render_tokens(&result.tokens));
            }

            if !options.quiet {
                eprintln!(
                    "OK: {} raw tokens -> {} canonical tokens in {:.2}ms",
                    result.raw_token_count,
                    token_count,
                    result.processing_duration.as_secs_f64() * 1000.0
                );
            }
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            print_detailed_error(&error);

            // Print cargo-style error summary
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_detailed_error(error: &pipeline::PipelineError) {
    match error {
        pipeline::PipelineError::FileProcessing(ref file_err) => {
            eprintln!("File processing stage failed:");
            eprintln!("  {}", file_err);
        }
        pipeline::PipelineError::RawStream(ref stream_err) => {
            eprintln!("Raw stream parsing stage failed:");
            eprintln!("  {}", stream_err);
        }
        pipeline::PipelineError::Normalize(ref normalize_err) => {
            eprintln!("Normalization stage failed:");
            eprintln!("  {}", normalize_err);
        }
        pipeline::PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        let args = vec!["--json".to_string(), "--quiet".to_string()];
        let options = parse_options(&args);
        assert!(options.json);
        assert!(options.quiet);
    }

    #[test]
    fn test_parse_options_unknown() {
        let args = vec!["--frobnicate".to_string()];
        let options = parse_options(&args);
        assert!(!options.json);
        assert!(!options.quiet);
    }
}
