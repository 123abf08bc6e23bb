// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! `embedrc` command line resource compiler. */

use {
    anyhow::{anyhow, Context, Result},
    clap::{Arg, Command},
    embedded_resources::{
        compile, render_header, write_output_file, EmitOptions, Error, Manifest, OutputStyle,
    },
    log::{error, info, LevelFilter},
    std::path::PathBuf,
};

const DEFAULT_CPP_OUTPUT: &str = "embedded_resources.gen.cpp";
const DEFAULT_C_OUTPUT: &str = "embedded_resources.gen.c";

const ABOUT: &str = "\
embedrc compiles file resources into C/C++ source code.

Resources are declared in a manifest file with one resource per line:

    <key> <path>

The key is the identifier the resource is retrieved by at runtime and
runs up to the first space. The path is the remainder of the line and
may contain spaces. Relative paths are resolved against the manifest's
directory. Blank lines are ignored.

The generated source embeds each file's bytes and defines an accessor
for retrieving them by key:

    const char *embedrc_get(const char *key, size_t *size);

C++ output additionally defines embedrc_string(), embedrc_bytes(), and
embedrc_view(), returning std::string, std::vector<uint8_t>, and a
pointer/length std::pair respectively.

Output is written to embedded_resources.gen.cpp (or .gen.c with
--c-only) unless OUTFILE or --output says otherwise.
";

fn default_output_path(options: &EmitOptions) -> PathBuf {
    if options.cpp_wrappers {
        PathBuf::from(DEFAULT_CPP_OUTPUT)
    } else {
        PathBuf::from(DEFAULT_C_OUTPUT)
    }
}

fn main_impl() -> Result<()> {
    let matches = Command::new("embedrc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gregory Szorc <gregory.szorc@gmail.com>")
        .about("Compile file resources into C/C++ source code")
        .long_about(ABOUT)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Increase logging verbosity. Can be specified multiple times"),
        )
        .arg(
            Arg::new("c_only")
                .long("c-only")
                .short('c')
                .help("Emit plain C without the C++ accessor wrappers"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .takes_value(true)
                .possible_values(["struct-array", "ordered-map"])
                .default_value("struct-array")
                .help("Lookup table representation to emit"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .takes_value(true)
                .value_name("PATH")
                .help("Write generated source to this path, overriding OUTFILE"),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .takes_value(true)
                .value_name("PATH")
                .help("Also write a companion header declaring the accessors"),
        )
        .arg(
            Arg::new("manifest")
                .value_name("MANIFEST")
                .required(true)
                .help("Manifest file declaring <key> <path> resources"),
        )
        .arg(
            Arg::new("outfile")
                .value_name("OUTFILE")
                .help("Path of the generated source file"),
        )
        .get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    );

    // Disable log context except at higher log levels.
    if log_level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.init();

    let options = EmitOptions {
        style: matches
            .value_of("style")
            .expect("style has a default value")
            .parse::<OutputStyle>()?,
        cpp_wrappers: !matches.is_present("c_only"),
    };

    options
        .validate()
        .map_err(|_| anyhow!("--style ordered-map cannot be combined with --c-only"))?;

    let manifest_path = PathBuf::from(matches.value_of("manifest").expect("manifest is required"));

    let manifest = Manifest::from_path(&manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path.display()))?;

    info!(
        "read manifest {} declaring {} resources",
        manifest_path.display(),
        manifest.len()
    );

    let source = match compile(&manifest, &options) {
        Ok(source) => source,
        Err(Error::ResourceNotFound(missing)) => {
            for resource in &missing {
                error!("unable to read {}", resource);
            }

            return Err(anyhow!("{} source files could not be read", missing.len()));
        }
        Err(err) => return Err(err.into()),
    };

    let output_path = matches
        .value_of("output")
        .or_else(|| matches.value_of("outfile"))
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&options));

    write_output_file(&output_path, &source)?;
    info!("wrote {}", output_path.display());

    if let Some(header_path) = matches.value_of("header") {
        write_output_file(header_path, &render_header(&options))?;
        info!("wrote {}", header_path);
    }

    Ok(())
}

fn main() {
    let exit_code = match main_impl() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            1
        }
    };

    std::process::exit(exit_code)
}
