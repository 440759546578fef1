//! User-facing message texts and the notice banner.

use crate::domain::FinderError;
use serde::Serialize;

pub const LOCATION_PENDING: &str = "위치 정보를 불러오는 중...";
pub const LOCATION_FALLBACK: &str = "현재 위치를 가져오지 못했습니다. 기본 위치를 사용합니다.";
pub const GEOCODE_UNAVAILABLE: &str = "주소를 가져오지 못했습니다.";
pub const ADDRESS_NOT_FOUND: &str = "주소를 찾지 못했습니다. 주소를 더 구체적으로 입력해 주세요.";
pub const ADDRESS_SERVICE_UNREACHABLE: &str = "주소 검색 서버에 연결할 수 없습니다. 네트워크 상태를 확인해 주세요.";
pub const BACKEND_UNREACHABLE: &str = "백엔드 서버에 연결할 수 없습니다. 서버를 다시 실행해 주세요.";
pub const SEARCH_FAILED: &str = "검색에 실패했습니다. 잠시 후 다시 시도해 주세요.";
pub const REQUEST_REJECTED: &str = "요청을 처리하지 못했습니다.";
pub const INVALID_COORDINATE: &str = "좌표가 올바르지 않습니다.";
pub const CONFIG_INVALID: &str = "설정을 불러오지 못했습니다.";
pub const SEARCHING: &str = "검색 중...";
pub const NO_RESULTS: &str = "음식점을 찾을 수 없습니다";
pub const PIN_PROMPT: &str = "지도를 이동하여 위치를 선택하세요";
pub const MENUS_LOADING: &str = "메뉴 정보를 불러오는 중...";
pub const MENUS_EMPTY: &str = "메뉴 정보가 없습니다. 메뉴를 추가해주세요!";
pub const MENU_CONTRIBUTE_FAILED: &str = "메뉴 추가에 실패했습니다";
pub const DELIVERY_SAVED: &str = "배달 정보가 저장되었습니다!";
pub const DELIVERY_FAILED: &str = "저장에 실패했습니다.";

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A banner message shown above the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// The notice shown for an error kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodfinder::ui::{Notice, NoticeKind};
    /// use foodfinder::FinderError;
    ///
    /// let notice = Notice::from_error(&FinderError::BackendUnreachable("refused".into()));
    /// assert_eq!(notice.kind, NoticeKind::Error);
    /// assert!(notice.message.starts_with("백엔드 서버에 연결할 수 없습니다"));
    /// ```
    #[must_use]
    pub fn from_error(error: &FinderError) -> Self {
        match error {
            FinderError::LocationUnavailable(_) => Self::warning(LOCATION_FALLBACK),
            FinderError::GeocodeUnavailable(_) => Self::warning(GEOCODE_UNAVAILABLE),
            FinderError::AddressNotFound(_) => Self::error(ADDRESS_NOT_FOUND),
            FinderError::NetworkUnavailable(_) => Self::error(ADDRESS_SERVICE_UNREACHABLE),
            FinderError::BackendUnreachable(_) => Self::error(BACKEND_UNREACHABLE),
            FinderError::SearchFailed(_) => Self::error(SEARCH_FAILED),
            FinderError::RequestRejected(_) => Self::error(REQUEST_REJECTED),
            FinderError::ValidationRejected { field, reason } => {
                Self::warning(format!("입력값을 확인해 주세요 ({field}): {reason}"))
            }
            FinderError::InvalidCoordinate(_) => Self::error(INVALID_COORDINATE),
            FinderError::Config(_) => Self::error(CONFIG_INVALID),
        }
    }
}
