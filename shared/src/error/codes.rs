//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 3xxx: Calendar errors (weekday labels, dates)
//! - 4xxx: Menu errors
//! - 5xxx: Attendance errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values on the wire so the frontend can switch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Required field missing
    RequiredField = 7,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Coordinator acting outside their branch/department
    OutOfScope = 2006,

    // ==================== 3xxx: Calendar ====================
    /// Label does not name a weekday
    NotAWeekday = 3001,
    /// Day label does not match the date's weekday
    DayMismatch = 3002,

    // ==================== 4xxx: Menu ====================
    /// Weekly menu not found
    MenuNotFound = 4001,
    /// Weekly menu already exists for that week
    MenuAlreadyExists = 4002,
    /// Weekly menu is already published
    MenuAlreadyPublished = 4003,
    /// No published menu covers the date
    MenuNotPublished = 4004,
    /// Menu item index out of range
    MenuItemNotFound = 4005,
    /// Stored menu document is not a mapping
    MalformedMenu = 4006,
    /// The day has no items on the menu
    NoMenuForDay = 4007,

    // ==================== 5xxx: Attendance ====================
    /// Attendee count out of range
    InvalidAttendeeCount = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Numeric value of this code
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "Required field is missing",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OutOfScope => "Outside of your branch or department",

            // Calendar
            ErrorCode::NotAWeekday => "Not a weekday",
            ErrorCode::DayMismatch => "Day does not match the selected date",

            // Menu
            ErrorCode::MenuNotFound => "Weekly menu not found",
            ErrorCode::MenuAlreadyExists => "Weekly menu already exists",
            ErrorCode::MenuAlreadyPublished => "Weekly menu is already published",
            ErrorCode::MenuNotPublished => "No published menu for that date",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MalformedMenu => "Menu document is malformed",
            ErrorCode::NoMenuForDay => "No menu items for that day",

            // Attendance
            ErrorCode::InvalidAttendeeCount => "Invalid attendee count",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            7 => Ok(ErrorCode::RequiredField),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2006 => Ok(ErrorCode::OutOfScope),

            // Calendar
            3001 => Ok(ErrorCode::NotAWeekday),
            3002 => Ok(ErrorCode::DayMismatch),

            // Menu
            4001 => Ok(ErrorCode::MenuNotFound),
            4002 => Ok(ErrorCode::MenuAlreadyExists),
            4003 => Ok(ErrorCode::MenuAlreadyPublished),
            4004 => Ok(ErrorCode::MenuNotPublished),
            4005 => Ok(ErrorCode::MenuItemNotFound),
            4006 => Ok(ErrorCode::MalformedMenu),
            4007 => Ok(ErrorCode::NoMenuForDay),

            // Attendance
            5002 => Ok(ErrorCode::InvalidAttendeeCount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
