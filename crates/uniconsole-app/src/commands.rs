//! Sample commands registered by the desktop host.

use rand::Rng;
use uniconsole_terminal::{CommandCatalog, CommandDescriptor, EnumType, TypeTag, Value};
use uniconsole_types::error::{ConsoleError, Result};

const SAMPLE_SCOPE: &str = "TestingScript";

/// Largest number of elements the random-array commands produce.
const MAX_GENERATED: usize = 10_000;

fn length(n: i64) -> Result<usize> {
    if n < 0 {
        return Err(ConsoleError::Command(format!("length must not be negative: {n}")));
    }
    usize::try_from(n)
        .ok()
        .filter(|&len| len <= MAX_GENERATED)
        .ok_or_else(|| ConsoleError::Command(format!("length {n} exceeds the limit of {MAX_GENERATED}")))
}

fn random_row(len: usize) -> Vec<i64> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(0..100)).collect()
}

fn severity_enum() -> EnumType {
    EnumType::new("Severity", ["Message", "Warning", "Error"])
}

/// Register the sample commands into a catalog.
pub fn register_sample_commands(catalog: &mut CommandCatalog) {
    catalog
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "TestCommand")
                .returns(TypeTag::String)
                .description("Prints test things")
                .handler(|_| Ok(Value::from("hehehehaaaa"))),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "TestCommand2")
                .returns(TypeTag::String)
                .description("Prints test things")
                .handler(|_| Ok(Value::from("Hello, World!"))),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "ComplexCommand")
                .param(TypeTag::Integer)
                .returns(TypeTag::String)
                .description("Does something complex")
                .handler(|ctx| {
                    let n = ctx.int(0)?;
                    let square = n
                        .checked_mul(n)
                        .ok_or_else(|| ConsoleError::Command(format!("{n} squared overflows")))?;
                    Ok(Value::from(format!("Square of {n} is {square}")))
                }),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "Add")
                .param(TypeTag::Integer)
                .param(TypeTag::Integer)
                .returns(TypeTag::String)
                .description("Adds two numbers")
                .handler(|ctx| Ok(Value::from(ctx.int(0)?.wrapping_add(ctx.int(1)?).to_string()))),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "Add")
                .param(TypeTag::Integer)
                .param(TypeTag::Integer)
                .param(TypeTag::Integer)
                .returns(TypeTag::Integer)
                .description("Adds three numbers")
                .handler(|ctx| {
                    let sum = ctx.int(0)?.wrapping_add(ctx.int(1)?).wrapping_add(ctx.int(2)?);
                    Ok(Value::Int(sum))
                }),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "Sum")
                .param(TypeTag::array(TypeTag::Integer))
                .returns(TypeTag::Integer)
                .description("Adds a comma-separated list of numbers")
                .handler(|ctx| {
                    let total = ctx
                        .array(0)?
                        .iter()
                        .filter_map(Value::as_int)
                        .fold(0i64, i64::wrapping_add);
                    Ok(Value::Int(total))
                }),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "GetRandomArray")
                .param(TypeTag::Integer)
                .returns(TypeTag::array(TypeTag::Integer))
                .description("Returns an array of random numbers")
                .handler(|ctx| Ok(Value::from(random_row(length(ctx.int(0)?)?)))),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "GetRandomArray2D")
                .param(TypeTag::Integer)
                .param(TypeTag::Integer)
                .returns(TypeTag::array(TypeTag::array(TypeTag::Integer)))
                .description("Returns a higher dimensional array of random numbers")
                .handler(|ctx| {
                    let rows = length(ctx.int(0)?)?;
                    let cols = length(ctx.int(1)?)?;
                    if rows.saturating_mul(cols) > MAX_GENERATED {
                        return Err(ConsoleError::Command(format!(
                            "{rows}x{cols} exceeds the limit of {MAX_GENERATED} elements"
                        )));
                    }
                    let grid: Vec<Vec<i64>> = (0..rows).map(|_| random_row(cols)).collect();
                    Ok(Value::from(grid))
                }),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "Swap")
                .param(TypeTag::Integer)
                .param(TypeTag::Integer)
                .returns(TypeTag::Tuple(vec![TypeTag::Integer, TypeTag::Integer]))
                .handler(|ctx| Ok(Value::from((ctx.int(1)?, ctx.int(0)?)))),
        )
        .register(
            CommandDescriptor::builder(SAMPLE_SCOPE, "Log")
                .param(TypeTag::Enum(severity_enum()))
                .param(TypeTag::String)
                .description("Writes a line to the host log")
                .handler(|ctx| {
                    let text = ctx.str(1)?;
                    match ctx.str(0)? {
                        "Warning" => log::warn!("{text}"),
                        "Error" => log::error!("{text}"),
                        _ => log::info!("{text}"),
                    }
                    Ok(Value::Void)
                }),
        )
        .register(
            CommandDescriptor::builder("TestClass", "TestCommand")
                .namespace("Samples")
                .returns(TypeTag::String)
                .description("Does testing things from another class")
                .handler(|_| Ok(Value::from("TestCommand"))),
        );
}

#[cfg(test)]
mod tests {
    use uniconsole_terminal::{BufferSink, Console, Outcome};
    use uniconsole_types::config::ConsoleConfig;

    use super::*;

    fn console() -> Console<BufferSink> {
        let mut catalog = CommandCatalog::with_builtins();
        register_sample_commands(&mut catalog);
        Console::new(ConsoleConfig::default(), catalog, BufferSink::new()).unwrap()
    }

    fn executed(line: &str) -> String {
        match console().submit(line).unwrap() {
            Outcome::Executed(text) => text,
            other => panic!("{line}: expected executed, got {other:?}"),
        }
    }

    #[test]
    fn samples_register_cleanly() {
        let c = console();
        // two help overloads plus eleven samples
        assert_eq!(c.registry().snapshot().unwrap().len(), 13);
    }

    #[test]
    fn simple_commands() {
        assert_eq!(executed("testcommand2"), "Hello, World!");
        assert_eq!(executed("complexcommand 12"), "Square of 12 is 144");
        assert_eq!(executed("add 2 3"), "5");
        assert_eq!(executed("add 2 3 4"), "9");
        assert_eq!(executed("sum 1,2,3,4"), "10");
        assert_eq!(executed("swap 1 2"), "(2, 1)");
    }

    #[test]
    fn random_array_has_requested_length() {
        let text = executed("getrandomarray 5");
        let parts: Vec<i64> = text.split(", ").map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 5);
        assert!(parts.iter().all(|n| (0..100).contains(n)));
        assert_eq!(executed("getrandomarray 0"), "");
    }

    #[test]
    fn negative_length_fails() {
        assert!(matches!(
            console().submit("getrandomarray -1").unwrap(),
            Outcome::InvocationFailed(_)
        ));
    }

    #[test]
    fn oversized_length_fails_without_allocating() {
        for line in [
            "getrandomarray 9223372036854775807",
            "getrandomarray 10001",
            "getrandomarray2d 9223372036854775807 2",
            "getrandomarray2d 200 200",
        ] {
            match console().submit(line).unwrap() {
                Outcome::InvocationFailed(reason) => assert!(reason.contains("limit"), "{line}: {reason}"),
                other => panic!("{line}: expected invocation failure, got {other:?}"),
            }
        }
        let text = executed(&format!("getrandomarray {MAX_GENERATED}"));
        assert_eq!(text.split(", ").count(), MAX_GENERATED);
    }

    #[test]
    fn swap_declares_a_tuple() {
        let help = executed("help swap");
        assert!(help.starts_with("Swap(int, int) -> (int, int)"), "{help}");
    }

    #[test]
    fn two_dimensional_array_cannot_be_shown() {
        assert!(matches!(
            console().submit("getrandomarray2d 2 2").unwrap(),
            Outcome::FormatFailed(_)
        ));
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            console().submit("complexcommand 9223372036854775807").unwrap(),
            Outcome::InvocationFailed(_)
        ));
    }

    #[test]
    fn testcommand_needs_qualification() {
        assert!(matches!(
            console().submit("testcommand").unwrap(),
            Outcome::Ambiguous(_)
        ));
        assert_eq!(executed("testingscript.testcommand"), "hehehehaaaa");
        assert_eq!(executed("TestClass.TestCommand"), "TestCommand");
    }

    #[test]
    fn log_takes_enum_by_name_or_ordinal() {
        assert_eq!(executed("log warning hi"), "Command executed successfully");
        assert_eq!(executed("log 2 hi"), "Command executed successfully");
        assert!(matches!(
            console().submit("log 3 hi").unwrap(),
            Outcome::ArgumentError(_)
        ));
    }
}
