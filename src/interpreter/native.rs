use super::error::RuntimeErrorKind;
use super::value::Value;
use super::SystemContext;
use compact_str::CompactString;

pub trait NativeFunction: std::fmt::Debug + Send + Sync {
    fn get_name(&self) -> &'static str;
    fn call(
        &self,
        arguments: &[Value],
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind>;
}

/// Finds the built-in bound to `name`.
pub fn lookup(name: &str) -> Option<&'static dyn NativeFunction> {
    NATIVES
        .iter()
        .copied()
        .find(|native| native.get_name() == name)
}

static NATIVES: [&dyn NativeFunction; 4] =
    [&NativePrint, &NativeInput, &NativeLength, &NativeSubstring];

#[derive(Debug)]
pub struct NativePrint;

impl NativeFunction for NativePrint {
    fn get_name(&self) -> &'static str {
        "print"
    }

    fn call(
        &self,
        arguments: &[Value],
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        let line = arguments
            .iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        context.writeln(&line);
        Ok(Value::Integer(0))
    }
}

#[derive(Debug)]
pub struct NativeInput;

impl NativeFunction for NativeInput {
    fn get_name(&self) -> &'static str {
        "input"
    }

    fn call(
        &self,
        arguments: &[Value],
        context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        // Only the first argument is a prompt, the rest are ignored.
        if let Some(prompt) = arguments.first() {
            context.write(&prompt.to_string());
        }
        let line = context.read_line().unwrap_or_default();
        Ok(Value::String(line.into()))
    }
}

#[derive(Debug)]
pub struct NativeLength;

impl NativeFunction for NativeLength {
    fn get_name(&self) -> &'static str {
        "length"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        let [value] = arguments else {
            return Err(RuntimeErrorKind::InvalidArgument(
                "length() expects exactly 1 argument",
            ));
        };
        match value {
            Value::String(text) => Ok(Value::Integer(text.chars().count() as i64)),
            _ => Err(RuntimeErrorKind::InvalidArgument(
                "length() can only be called on strings",
            )),
        }
    }
}

#[derive(Debug)]
pub struct NativeSubstring;

impl NativeFunction for NativeSubstring {
    fn get_name(&self) -> &'static str {
        "substring"
    }

    fn call(
        &self,
        arguments: &[Value],
        _context: &mut dyn SystemContext,
    ) -> Result<Value, RuntimeErrorKind> {
        let (text, start, length) = match arguments {
            [text, start] => (text, start, None),
            [text, start, length] => (text, start, Some(length)),
            _ => {
                return Err(RuntimeErrorKind::InvalidArgument(
                    "substring() expects 2 or 3 arguments: substring(string, start, [length])",
                ))
            }
        };
        let Value::String(text) = text else {
            return Err(RuntimeErrorKind::InvalidArgument(
                "substring() first argument must be a string",
            ));
        };
        let Value::Integer(start) = *start else {
            return Err(RuntimeErrorKind::InvalidArgument(
                "substring() second argument must be an integer",
            ));
        };

        // An out-of-range start wins over a malformed length.
        let count = text.chars().count();
        let empty = Value::String(CompactString::default());
        let Ok(start) = usize::try_from(start) else {
            return Ok(empty);
        };
        if start >= count {
            return Ok(empty);
        }
        let length = match length {
            None => None,
            Some(Value::Integer(length)) => Some(*length),
            Some(_) => {
                return Err(RuntimeErrorKind::InvalidArgument(
                    "substring() third argument must be an integer",
                ))
            }
        };
        let take = match length {
            None => count - start,
            Some(length) => match usize::try_from(length) {
                Ok(length) => length.min(count - start),
                Err(_) => return Ok(empty),
            },
        };

        Ok(Value::String(text.chars().skip(start).take(take).collect()))
    }
}
