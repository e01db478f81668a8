use super::{detection_regex, DetectionRule, Severity};

detection_regex!(RE_POSTGRES, r"(?i)postgres(?:ql)?://[^:\s]+:[^@\s]+@[^\s]+");
detection_regex!(RE_MYSQL, r"(?i)mysql://[^:\s]+:[^@\s]+@[^\s]+");
detection_regex!(RE_MONGODB, r"(?i)mongodb(?:\+srv)?://[^:\s]+:[^@\s]+@[^\s]+");
detection_regex!(RE_REDIS, r"(?i)rediss?://[^:\s]*:[^@\s]+@[^\s]+");
detection_regex!(RE_AMQP, r"(?i)amqps?://[^:\s]+:[^@\s]+@[^\s]+");
detection_regex!(
    RE_MSSQL,
    r"(?i)(?:Server|Data Source)=[^;]+;.*(?:Password|Pwd)=[^;\s]+"
);

fn connection(
    name: &'static str,
    regex: &'static std::sync::LazyLock<Option<regex::Regex>>,
) -> DetectionRule {
    DetectionRule {
        name,
        category: "connection_string",
        regex,
        placeholder: "[CONNECTION_STRING]",
        base_confidence: 0.95,
        severity: Severity::Credential,
    }
}

/// Connection strings carrying inline credentials.
pub fn all_rules() -> Vec<DetectionRule> {
    vec![
        connection("postgres", &RE_POSTGRES),
        connection("mysql", &RE_MYSQL),
        connection("mongodb", &RE_MONGODB),
        connection("redis", &RE_REDIS),
        connection("amqp", &RE_AMQP),
        connection("mssql", &RE_MSSQL),
    ]
}
