use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use termcolor::ColorChoice;

pub fn build_command() -> Command {
    command!()
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Binary file to scan"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .value_name("PATH")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON file mapping pattern names to regexes")
                .long_help(
                    "JSON file mapping pattern names to regexes.\n\
                     Each key holds either a single regex string or an array of \
                     regex strings, evaluated in order.",
                ),
        )
        .arg(
            Arg::new("max_results")
                .short('m')
                .long("max-results")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .default_value("20")
                .help("Maximum number of results displayed per pattern"),
        )
        .arg(
            Arg::new("no_color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colors in the output"),
        )
}

#[derive(Debug)]
pub struct Options {
    pub file: PathBuf,
    pub json: PathBuf,
    pub max_results: usize,
    pub color: ColorChoice,
}

impl Options {
    pub fn from_args(mut args: ArgMatches) -> Self {
        Self {
            file: args.remove_one::<PathBuf>("file").unwrap(),
            json: args.remove_one::<PathBuf>("json").unwrap(),
            max_results: args.remove_one::<usize>("max_results").unwrap(),
            color: if args.get_flag("no_color") {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        build_command().debug_assert();
    }

    #[test]
    fn test_options_from_args() {
        fn parse(cmdline: &str) -> Options {
            Options::from_args(build_command().get_matches_from(cmdline.split(' ')))
        }

        let options = parse("strsift -f libapp.so -j regexes.json");
        assert_eq!(options.file, PathBuf::from("libapp.so"));
        assert_eq!(options.json, PathBuf::from("regexes.json"));
        assert_eq!(options.max_results, 20);
        assert_eq!(options.color, ColorChoice::Auto);

        let options = parse("strsift --file a --json b --max-results 50 --no-color");
        assert_eq!(options.max_results, 50);
        assert_eq!(options.color, ColorChoice::Never);
    }
}
