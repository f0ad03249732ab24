//! Command-line argument parsing.
//!
//! Positional parameters take the leading tokens. Remaining tokens are
//! `--name`, `-name`, `--name=value` or `-name=value`; a parameter whose
//! value is mandatory takes the following token when no `=value` is given.

use crate::errmap::{LocatedError, POSITIONAL_KEY};
use crate::error::ParamError;
use crate::location::SourceLocation;
use crate::registry::Registry;
use crate::resolve::Resolution;
use crate::suggest;
use crate::types::ValueReq;

/// Source name used in locations for command-line tokens.
pub const SOURCE: &str = "command line";

pub(crate) fn parse_args(registry: &Registry, args: &[String], res: &mut Resolution) {
    let mut loc = SourceLocation::new(SOURCE);

    let positional = registry.positional();
    if args.len() < positional.len() {
        let err = ParamError::MissingPositional {
            missing: positional.len() - args.len(),
            expected: positional.iter().map(|p| p.name().to_string()).collect(),
        };
        res.errors
            .record(POSITIONAL_KEY, LocatedError::new(err, None));
        return;
    }

    for (i, param) in positional.iter().enumerate() {
        let token = &args[i];
        loc.incr();
        loc.set_content(token.as_str());
        res.apply(param, &loc, Some(token.as_str()));

        if param.is_terminal() {
            res.remainder = args[i + 1..].to_vec();
            tracing::debug!(
                param = param.name(),
                count = res.remainder.len(),
                "terminal positional parameter reached"
            );
            return;
        }
    }

    let mut i = positional.len();
    while i < args.len() {
        let token = &args[i];
        loc.incr();
        loc.set_content(token.as_str());

        if registry.terminal_param() == Some(token.as_str()) {
            res.remainder = args[i + 1..].to_vec();
            tracing::debug!(count = res.remainder.len(), "terminal token reached");
            return;
        }

        let (spec, inline_value) = match token.split_once('=') {
            Some((spec, value)) => (spec, Some(value)),
            None => (token.as_str(), None),
        };

        let name = match trim_param(spec) {
            Ok(name) => name,
            Err(e) => {
                res.errors.record(spec, LocatedError::at(e, &loc));
                i += 1;
                continue;
            }
        };

        match registry.get(name) {
            Some(param) => {
                let mut value = inline_value;
                if value.is_none()
                    && param.value_req() == ValueReq::Mandatory
                    && i + 1 < args.len()
                {
                    i += 1;
                    loc.incr();
                    loc.set_content(format!("{token} {}", args[i]));
                    value = Some(args[i].as_str());
                }
                res.apply(param, &loc, value);
            }
            None => {
                let suggestion = suggest::closest_match(name, registry.names());
                tracing::debug!(param = name, ?suggestion, "unrecognized parameter");
                res.errors.record(
                    name,
                    LocatedError::at(
                        ParamError::Unrecognized {
                            name: name.to_string(),
                            suggestion,
                        },
                        &loc,
                    ),
                );
            }
        }
        i += 1;
    }
}

/// Strip the leading `--` or, failing that, `-` from a parameter name.
fn trim_param(spec: &str) -> Result<&str, ParamError> {
    let name = spec
        .strip_prefix("--")
        .or_else(|| spec.strip_prefix('-'))
        .ok_or_else(|| ParamError::Syntax {
            token: spec.to_string(),
        })?;
    if name.is_empty() {
        return Err(ParamError::MissingName {
            token: spec.to_string(),
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Fixture;
    use crate::suggest::Suggestion;

    #[test]
    fn trim_prefers_double_dash() {
        assert_eq!(trim_param("--count").unwrap(), "count");
        assert_eq!(trim_param("-count").unwrap(), "count");
        assert_eq!(trim_param("---count").unwrap(), "-count");
        assert!(matches!(trim_param("count"), Err(ParamError::Syntax { .. })));
        assert!(matches!(trim_param("-"), Err(ParamError::MissingName { .. })));
        assert!(matches!(trim_param("--"), Err(ParamError::MissingName { .. })));
    }

    #[test]
    fn bare_dash_is_keyed_by_token_not_positional() {
        let f = Fixture::new();
        let reg = f.named_builder().terminal_param("").build().unwrap();
        let res = reg.parse(["-", "--", "-=1", "-v"]);

        assert!(!res.errors().contains_key(POSITIONAL_KEY));
        for key in ["-", "--"] {
            let errs = res.errors().get(key).unwrap();
            assert!(matches!(errs[0].error, ParamError::MissingName { .. }));
        }
        assert_eq!(res.errors().get("-").unwrap().len(), 2);
        assert!(f.verbose.get());
    }

    #[test]
    fn end_to_end_positional_inline_value_and_typo() {
        let f = Fixture::new();
        let reg = f.builder().build().unwrap();
        let res = reg.parse(["in.txt", "--count=5", "--verbos"]);

        assert_eq!(f.src.get(), "in.txt");
        assert_eq!(f.count.get(), 5);
        assert!(!f.verbose.get());

        let errors = res.errors();
        assert_eq!(errors.len(), 1);
        let errs = errors.get("verbos").unwrap();
        assert_eq!(errs.len(), 1);
        match &errs[0].error {
            ParamError::Unrecognized { name, suggestion } => {
                assert_eq!(name, "verbos");
                assert_eq!(
                    suggestion.as_ref(),
                    Some(&Suggestion {
                        names: vec!["verbose".into()],
                        distance: 1,
                    })
                );
            }
            other => panic!("Expected Unrecognized, got: {other:?}"),
        }
        let loc = errs[0].location.as_ref().unwrap();
        assert_eq!(loc.line, 3);
        assert_eq!(loc.content, "--verbos");
    }

    #[test]
    fn two_positionals_bind_in_order() {
        let f = Fixture::new();
        let reg = f.two_positional_builder().build().unwrap();
        let res = reg.parse(["a.txt", "b.txt"]);
        assert!(!res.has_errors());
        assert_eq!(f.src.get(), "a.txt");
        assert_eq!(f.dst.get(), "b.txt");
    }

    #[test]
    fn missing_positional_names_all_expected() {
        let f = Fixture::new();
        let reg = f.two_positional_builder().build().unwrap();
        let res = reg.parse(["a.txt"]);

        let errs = res.errors().get(POSITIONAL_KEY).unwrap();
        assert_eq!(errs.len(), 1);
        match &errs[0].error {
            ParamError::MissingPositional { missing, expected } => {
                assert_eq!(*missing, 1);
                assert_eq!(expected, &vec!["src".to_string(), "dst".to_string()]);
            }
            other => panic!("Expected MissingPositional, got: {other:?}"),
        }
        assert_eq!(f.src.get(), "", "nothing is bound when positionals are missing");
    }

    #[test]
    fn missing_positional_skips_named_phase() {
        let f = Fixture::new();
        let reg = f.two_positional_builder().build().unwrap();
        let res = reg.parse(Vec::<String>::new());
        let err = &res.errors().get(POSITIONAL_KEY).unwrap()[0].error;
        assert!(err.to_string().starts_with("Some parameters are missing, 2 more"));
        assert_eq!(res.errors().len(), 1);
    }

    #[test]
    fn terminal_positional_captures_rest_verbatim() {
        let f = Fixture::new();
        let reg = f.terminal_builder().build().unwrap();
        let res = reg.parse(["run", "--bogus", "x=1", "-v"]);

        assert!(!res.has_errors(), "{}", res.errors().report());
        assert_eq!(f.src.get(), "run");
        assert_eq!(res.remainder(), ["--bogus", "x=1", "-v"]);
        assert!(!f.verbose.get());
    }

    #[test]
    fn terminal_token_captures_rest() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["-v", "--", "--count", "9"]);

        assert!(!res.has_errors());
        assert!(f.verbose.get());
        assert_eq!(f.count.get(), 0);
        assert_eq!(res.remainder(), ["--count", "9"]);
    }

    #[test]
    fn custom_terminal_token() {
        let f = Fixture::new();
        let reg = f.named_builder().terminal_param("--end").build().unwrap();
        let res = reg.parse(["--end", "--", "z"]);
        assert!(!res.has_errors());
        assert_eq!(res.remainder(), ["--", "z"]);
    }

    #[test]
    fn mandatory_value_taken_from_next_token() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["--count", "7", "-v"]);

        assert!(!res.has_errors(), "{}", res.errors().report());
        assert_eq!(f.count.get(), 7);
        assert!(f.verbose.get());
        let at = res.set_at("count");
        assert_eq!(at[0].line, 2);
        assert_eq!(at[0].content, "--count 7");
    }

    #[test]
    fn mandatory_value_missing_at_end_reaches_setter() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["--count"]);

        let errs = res.errors().get("count").unwrap();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0].error, ParamError::InvalidValue { .. }));
        assert!(errs[0].error.to_string().starts_with("no number given"));
    }

    #[test]
    fn optional_value_does_not_consume_next_token() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["--verbose", "--count=1"]);
        assert!(!res.has_errors());
        assert!(f.verbose.get());
        assert_eq!(f.count.get(), 1);
    }

    #[test]
    fn value_less_parameter_rejects_value_and_skips_lookahead() {
        use crate::action::Counter;
        use crate::param::Param;
        use crate::setter;

        let f = Fixture::new();
        let pings = Counter::new();
        let reg = f
            .named_builder()
            .add(Param::new("ping", setter::NoValue, "say hello").action(pings.action()))
            .build()
            .unwrap();
        let res = reg.parse(["--ping", "--count", "2", "--ping=loud"]);

        assert_eq!(f.count.get(), 2, "--ping does not take the next token");
        let errs = res.errors().get("ping").unwrap();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0].error, ParamError::InvalidValue { .. }));
        assert_eq!(errs[0].location.as_ref().unwrap().content, "--ping=loud");
        assert_eq!(pings.set_by().len(), 1);
    }

    #[test]
    fn alt_name_errors_keyed_by_canonical_name() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["-c=abc"]);
        assert!(res.errors().contains_key("count"));
        assert!(!res.errors().contains_key("c"));
    }

    #[test]
    fn token_without_dash_is_syntax_error() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["count=3", "-v"]);

        let errs = res.errors().get("count").unwrap();
        assert!(matches!(errs[0].error, ParamError::Syntax { .. }));
        assert!(f.verbose.get(), "parsing continues after a syntax error");
    }

    #[test]
    fn errors_accumulate_across_tokens() {
        let f = Fixture::new();
        let reg = f.named_builder().build().unwrap();
        let res = reg.parse(["--count=x", "--nope", "--count=y"]);
        assert_eq!(res.errors().get("count").unwrap().len(), 2);
        assert_eq!(res.errors().get("nope").unwrap().len(), 1);
        assert_eq!(res.errors().error_count(), 3);
    }
}
