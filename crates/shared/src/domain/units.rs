//! Conversions from form input to the values the contract expects.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use chrono::{Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

use crate::error::DraftError;

/// Decimal amount in native token units to 18-decimal base units.
pub fn deposit_to_base_units(amount: &str) -> Result<U256, DraftError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(DraftError::Missing("refundable deposit"));
    }
    if amount.starts_with('-') {
        return Err(DraftError::InvalidDeposit(amount.into(), "must not be negative".into()));
    }
    parse_ether(amount).map_err(|e| DraftError::InvalidDeposit(amount.into(), e.to_string()))
}

pub fn parse_capacity(raw: &str) -> Result<u64, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DraftError::Missing("max capacity"));
    }
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(DraftError::InvalidCapacity(raw.into())),
    }
}

/// Date and time entered in the local zone of this machine, as epoch millis.
pub fn event_timestamp(date: &str, time: &str) -> Result<i64, DraftError> {
    event_timestamp_in(date, time, &Local)
}

/// DST fall-back overlaps resolve to the earlier instant.
pub fn event_timestamp_in<Tz: TimeZone>(date: &str, time: &str, tz: &Tz) -> Result<i64, DraftError> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() {
        return Err(DraftError::Missing("date"));
    }
    if time.is_empty() {
        return Err(DraftError::Missing("time"));
    }
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DraftError::InvalidDate(date.into()))?;
    let clock = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| DraftError::InvalidTime(time.into()))?;
    let millis = match tz.from_local_datetime(&day.and_time(clock)) {
        LocalResult::Single(at) => at.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => return Err(DraftError::NonexistentLocalTime(format!("{date} {time}"))),
    };
    // the contract stores the timestamp as uint256
    if millis < 0 {
        return Err(DraftError::BeforeEpoch(format!("{date} {time}")));
    }
    Ok(millis)
}
