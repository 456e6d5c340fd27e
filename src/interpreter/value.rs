use super::error::RuntimeErrorKind;
use compact_str::{CompactString, CompactStringExt};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(CompactString),
    Bool(bool),
}

impl Default for Value {
    fn default() -> Self {
        Value::Integer(0)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.6}"),
            Self::String(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

// Unary operators
impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::String(v) => !v.is_empty(),
            Value::Bool(v) => *v,
        }
    }

    pub fn logical_not(&self) -> Value {
        Value::Bool(!self.is_truthy())
    }

    pub fn negate(&self) -> Result<Value, RuntimeErrorKind> {
        match self {
            Value::Integer(v) => v
                .checked_neg()
                .map(Value::Integer)
                .ok_or(RuntimeErrorKind::IntegerOverflow),
            Value::Float(v) => Ok(Value::Float(-v)),
            _ => Err(RuntimeErrorKind::InvalidOperand {
                operation: "negation",
            }),
        }
    }

    pub fn plus(&self) -> Result<Value, RuntimeErrorKind> {
        match self {
            Value::Integer(_) | Value::Float(_) => Ok(self.clone()),
            _ => Err(RuntimeErrorKind::InvalidOperand {
                operation: "unary plus",
            }),
        }
    }
}

fn integer_op(
    lhs: i64,
    rhs: i64,
    op: fn(i64, i64) -> Option<i64>,
) -> Result<Value, RuntimeErrorKind> {
    op(lhs, rhs)
        .map(Value::Integer)
        .ok_or(RuntimeErrorKind::IntegerOverflow)
}

// Arithmetic, no implicit numeric promotion
impl Value {
    pub fn add(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => integer_op(*lhs, *rhs, i64::checked_add),
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Float(lhs + rhs)),
            (Value::String(lhs), Value::String(rhs)) => {
                Ok(Value::String([lhs, rhs].concat_compact()))
            }
            _ => Err(RuntimeErrorKind::InvalidOperands {
                operation: "addition",
            }),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => integer_op(*lhs, *rhs, i64::checked_sub),
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Float(lhs - rhs)),
            _ => Err(RuntimeErrorKind::InvalidOperands {
                operation: "subtraction",
            }),
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => integer_op(*lhs, *rhs, i64::checked_mul),
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Float(lhs * rhs)),
            _ => Err(RuntimeErrorKind::InvalidOperands {
                operation: "multiplication",
            }),
        }
    }

    pub fn divide(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(_), Value::Integer(0)) => Err(RuntimeErrorKind::DivisionByZero),
            (Value::Integer(lhs), Value::Integer(rhs)) => integer_op(*lhs, *rhs, i64::checked_div),
            (Value::Float(_), Value::Float(rhs)) if *rhs == 0.0 => {
                Err(RuntimeErrorKind::DivisionByZero)
            }
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Float(lhs / rhs)),
            _ => Err(RuntimeErrorKind::InvalidOperands {
                operation: "division",
            }),
        }
    }

    pub fn modulo(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(_), Value::Integer(0)) => Err(RuntimeErrorKind::ModuloByZero),
            (Value::Integer(lhs), Value::Integer(rhs)) => integer_op(*lhs, *rhs, i64::checked_rem),
            (Value::Float(_), Value::Float(rhs)) if *rhs == 0.0 => {
                Err(RuntimeErrorKind::ModuloByZero)
            }
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Float(lhs % rhs)),
            _ => Err(RuntimeErrorKind::InvalidOperands {
                operation: "modulo",
            }),
        }
    }
}

// Comparison
impl Value {
    fn compare(
        &self,
        other: &Value,
        int: fn(&i64, &i64) -> bool,
        float: fn(&f64, &f64) -> bool,
    ) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok(Value::Bool(int(lhs, rhs))),
            (Value::Float(lhs), Value::Float(rhs)) => Ok(Value::Bool(float(lhs, rhs))),
            _ => Err(RuntimeErrorKind::InvalidOperands {
                operation: "comparison",
            }),
        }
    }

    pub fn less_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.compare(other, i64::lt, f64::lt)
    }

    pub fn less_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.compare(other, i64::le, f64::le)
    }

    pub fn greater_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.compare(other, i64::gt, f64::gt)
    }

    pub fn greater_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        self.compare(other, i64::ge, f64::ge)
    }

    /// Structural equality. Values of different variants are never equal.
    pub fn is_equal(&self, other: &Value) -> Value {
        Value::Bool(self == other)
    }

    pub fn is_not_equal(&self, other: &Value) -> Value {
        Value::Bool(self != other)
    }
}
