use arglebargle::build::build_site;
use arglebargle::config::Config;
use clap::{App, Arg};
use std::path::Path;

fn main() {
    let matches = App::new("arglebargle")
        .about("Renders a directory of YAML blog records into cross-linked JSON output")
        .arg(
            Arg::with_name("project")
                .help("The project directory (searched upward for arglebargle.yaml)")
                .index(1)
                .default_value("."),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .help("The output directory")
                .takes_value(true)
                .default_value("_site"),
        )
        .get_matches();

    // both args have defaults, so unwrap can't fail
    let project = Path::new(matches.value_of("project").unwrap());
    let output = Path::new(matches.value_of("output").unwrap());

    let result = Config::from_directory(project, output)
        .map_err(|err| err.to_string())
        .and_then(|config| build_site(&config).map_err(|err| err.to_string()));
    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
