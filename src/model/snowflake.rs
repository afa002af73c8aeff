use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::{
    fmt::{Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

type InnerSnowflake = snowcloud::Snowflake<43, 8, 12>;

/// A snowflake id as it is stored and shown.
///
/// Ids are allocated by [`AppState::next_id`](super::AppState::next_id); this
/// type only carries the raw value around, so parsing one from a form or a
/// database row never fails on the generator's bit layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(i64);

impl Snowflake {
    pub fn id(&self) -> i64 {
        self.0
    }
}

impl From<InnerSnowflake> for Snowflake {
    fn from(value: InnerSnowflake) -> Self {
        Snowflake(value.id())
    }
}

impl From<i64> for Snowflake {
    fn from(value: i64) -> Self {
        Snowflake(value)
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Snowflake(s.trim().parse()?))
    }
}

impl Display for Snowflake {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// Strings, so that templates and browsers never round the value.
impl serde::Serialize for Snowflake {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id().to_string().serialize(serializer)
    }
}

impl ToSql for Snowflake {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.id()))
    }
}

impl FromSql for Snowflake {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Snowflake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_values() {
        assert_eq!("42".parse::<Snowflake>().unwrap().id(), 42);
        assert_eq!(" 7 ".parse::<Snowflake>().unwrap().id(), 7);
        assert!("forty-two".parse::<Snowflake>().is_err());
        assert!("".parse::<Snowflake>().is_err());
    }

    #[test]
    fn displays_raw_value() {
        assert_eq!(Snowflake(1234).to_string(), "1234");
    }
}
