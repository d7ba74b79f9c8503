//! Request outcome types and the metric families they are exported under.

/// Request outcome counted per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Total,
    Succeed,
    UnknownFailed,
    Processing,
    BusinessFailed,
    RequestTimeout,
    RequestLimit,
    TotalFailed,
}

impl EventType {
    /// Stable upper-case code, e.g. `TOTAL_FAILED`.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Total => "TOTAL",
            EventType::Succeed => "SUCCEED",
            EventType::UnknownFailed => "UNKNOWN_FAILED",
            EventType::Processing => "PROCESSING",
            EventType::BusinessFailed => "BUSINESS_FAILED",
            EventType::RequestTimeout => "REQUEST_TIMEOUT",
            EventType::RequestLimit => "REQUEST_LIMIT",
            EventType::TotalFailed => "TOTAL_FAILED",
        }
    }
}

/// Exported metric family.
///
/// Names are templates: `{side}` is substituted with the qualifier of the
/// owning key (e.g. `provider`), see [`MetricsKey::name_by_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricsKey {
    Requests,
    RequestsSucceed,
    RequestsFailed,
    RequestsProcessing,
    RequestBusinessFailed,
    RequestsTimeout,
    RequestsLimit,
    RequestsTotalFailed,
    RtLast,
    RtMin,
    RtMax,
    RtSum,
    RtAvg,
}

impl MetricsKey {
    /// Name template; `{side}` is filled by [`MetricsKey::name_by_type`].
    pub fn name(self) -> &'static str {
        match self {
            MetricsKey::Requests => "rpc.{side}.requests.total",
            MetricsKey::RequestsSucceed => "rpc.{side}.requests.succeed.total",
            MetricsKey::RequestsFailed => "rpc.{side}.requests.unknown.failed.total",
            MetricsKey::RequestsProcessing => "rpc.{side}.requests.processing",
            MetricsKey::RequestBusinessFailed => "rpc.{side}.requests.business.failed.total",
            MetricsKey::RequestsTimeout => "rpc.{side}.requests.timeout.total",
            MetricsKey::RequestsLimit => "rpc.{side}.requests.limit.total",
            MetricsKey::RequestsTotalFailed => "rpc.{side}.requests.failed.total",
            MetricsKey::RtLast => "rpc.{side}.rt.milliseconds.last",
            MetricsKey::RtMin => "rpc.{side}.rt.milliseconds.min",
            MetricsKey::RtMax => "rpc.{side}.rt.milliseconds.max",
            MetricsKey::RtSum => "rpc.{side}.rt.milliseconds.sum",
            MetricsKey::RtAvg => "rpc.{side}.rt.milliseconds.avg",
        }
    }

    /// HELP text for the family.
    pub fn description(self) -> &'static str {
        match self {
            MetricsKey::Requests => "Total Requests",
            MetricsKey::RequestsSucceed => "Succeed Requests",
            MetricsKey::RequestsFailed => "Total Unknown Failed Requests",
            MetricsKey::RequestsProcessing => "Processing Requests",
            MetricsKey::RequestBusinessFailed => "Failed Business Requests",
            MetricsKey::RequestsTimeout => "Total Timeout Failed Requests",
            MetricsKey::RequestsLimit => "Total Limit Failed Requests",
            MetricsKey::RequestsTotalFailed => "Total Failed Requests",
            MetricsKey::RtLast => "Last Response Time",
            MetricsKey::RtMin => "Min Response Time",
            MetricsKey::RtMax => "Max Response Time",
            MetricsKey::RtSum => "Sum Response Time",
            MetricsKey::RtAvg => "Average Response Time",
        }
    }

    /// Concrete family name for one qualifier, e.g. `rpc.consumer.requests.total`.
    pub fn name_by_type(self, ty: &str) -> String {
        self.name().replace("{side}", ty)
    }
}

/// Standard request counters in export order.
pub const STANDARD_COUNTERS: [(EventType, MetricsKey); 8] = [
    (EventType::Total, MetricsKey::Requests),
    (EventType::Succeed, MetricsKey::RequestsSucceed),
    (EventType::UnknownFailed, MetricsKey::RequestsFailed),
    (EventType::Processing, MetricsKey::RequestsProcessing),
    (EventType::BusinessFailed, MetricsKey::RequestBusinessFailed),
    (EventType::RequestTimeout, MetricsKey::RequestsTimeout),
    (EventType::RequestLimit, MetricsKey::RequestsLimit),
    (EventType::TotalFailed, MetricsKey::RequestsTotalFailed),
];
