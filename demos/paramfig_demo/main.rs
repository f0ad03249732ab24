//! A small program that resolves its parameters with paramfig.
//!
//! ```text
//! cargo run --example paramfig_demo -- input.txt --count 3 -v
//! cargo run --example paramfig_demo -- input.txt --colour=red     # typo, suggests "color"
//! cargo run --example paramfig_demo -- input.txt --json --bogus   # errors as JSON
//! cargo run --example paramfig_demo -- input.txt -- extra args    # remainder
//! ```
//!
//! Config files are read from the platform config directory
//! (`~/.config/paramfig-demo/demo.cfg` on Linux) and `~/.paramfig-demo.cfg`,
//! in that order, before the command line. Both are optional. A line such
//! as `paramfig_demo/count = 4` applies only to this program; the
//! `server.cfg` file in the same directory holds the `server` group.

use paramfig::action::Counter;
use paramfig::{Exists, Param, ParamSet, Slot, check, file, setter};

const APP_NAME: &str = "paramfig-demo";

struct Values {
    input: Slot<String>,
    count: Slot<i64>,
    ratio: Slot<f64>,
    verbose: Slot<bool>,
    color: Slot<String>,
    json: Slot<bool>,
    host: Slot<String>,
    port: Slot<i64>,
}

impl Values {
    fn new() -> Self {
        Self {
            input: Slot::default(),
            count: Slot::new(1),
            ratio: Slot::new(0.5),
            verbose: Slot::new(false),
            color: Slot::new("none".to_string()),
            json: Slot::new(false),
            host: Slot::new("localhost".to_string()),
            port: Slot::new(8080),
        }
    }
}

fn main() {
    let values = Values::new();
    let output_style = Counter::new();

    let mut builder = ParamSet::builder()
        .add_positional(Param::new(
            "input",
            setter::Str::new(&values.input),
            "the file to read",
        ))
        .add(
            Param::new(
                "count",
                setter::Int::new(&values.count).check(check::between(1, 100)),
                "how many times to echo",
            )
            .alt_name("c"),
        )
        .add(Param::new(
            "ratio",
            setter::Float::new(&values.ratio).check(check::between(0.0, 1.0)),
            "a fraction",
        ))
        .add(
            Param::new("verbose", setter::Bool::new(&values.verbose), "say more")
                .alt_name("v")
                .action(output_style.action()),
        )
        .add(
            Param::new("json", setter::Bool::new(&values.json), "report errors as JSON")
                .action(output_style.action()),
        )
        .add(Param::new(
            "color",
            setter::Enum::new(&values.color, ["none", "red", "green", "blue"]),
            "output colour",
        ))
        .add(
            Param::new("host", setter::Str::new(&values.host), "server host")
                .group("server"),
        )
        .add(
            Param::new(
                "port",
                setter::Int::new(&values.port).check(check::between(1, 65536)),
                "server port",
            )
            .group("server"),
        );

    if let Some(path) = file::platform_config_file(APP_NAME, "demo.cfg") {
        builder = builder.add_config_file(path, Exists::Optional);
    }
    builder = builder.add_config_file("~/.paramfig-demo.cfg", Exists::Optional);
    if let Some(path) = file::platform_config_file(APP_NAME, "server.cfg") {
        builder = builder.add_group_config_file("server", path, Exists::Optional);
    }

    let registry = builder.build().unwrap_or_else(|e| {
        eprintln!("Bad parameter definitions: {e}");
        std::process::exit(2);
    });

    let resolution = registry.parse_env();

    if resolution.has_errors() {
        if values.json.get() {
            match resolution.errors().to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to render errors: {e}"),
            }
        } else {
            eprint!("{}", resolution.errors().report());
        }
        std::process::exit(1);
    }

    if output_style.count() > 1 {
        eprintln!("Only one of --verbose and --json may be given:");
        for line in output_style.set_by() {
            eprintln!("\t{line}");
        }
        std::process::exit(1);
    }

    if values.verbose.get() {
        for param in registry.params() {
            for loc in resolution.set_at(param.name()) {
                println!("[verbose] {} set at {loc}", param.name());
            }
        }
        for (name, locs) in resolution.unused() {
            for loc in locs {
                println!("[verbose] {name} at {loc} is for another program");
            }
        }
    }

    println!("input   = {}", values.input.get());
    println!("count   = {}", values.count.get());
    println!("ratio   = {}", values.ratio.get());
    println!("color   = {}", values.color.get());
    println!("server  = {}:{}", values.host.get(), values.port.get());
    if !resolution.remainder().is_empty() {
        println!("rest    = {:?}", resolution.remainder());
    }
}
