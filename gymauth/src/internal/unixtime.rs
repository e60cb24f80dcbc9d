use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

//--------------------------------------------------------------------------------------------------
// Unix Timestamp handling
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnixTimestamp(OffsetDateTime);

impl Serialize for UnixTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.unix_timestamp().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let timestamp = i64::deserialize(deserializer)?;
        let datetime =
            OffsetDateTime::from_unix_timestamp(timestamp).map_err(serde::de::Error::custom)?;
        Ok(UnixTimestamp(datetime))
    }
}

impl From<UnixTimestamp> for OffsetDateTime {
    fn from(ts: UnixTimestamp) -> Self {
        ts.0
    }
}

impl UnixTimestamp {
    pub fn now() -> Self {
        UnixTimestamp(OffsetDateTime::now_utc())
    }

    pub fn is_past(self) -> bool {
        self.0 < OffsetDateTime::now_utc()
    }
}

//--------------------------------------------------------------------------------------------------
