use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// JSON `null` 與缺少欄位一樣視為零值（空字串、0、空陣列）
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `/api/v1/escalation_policies/on_call` 的單頁回應
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicyPage {
    #[serde(deserialize_with = "null_as_default")]
    pub escalation_policies: Vec<EscalationPolicy>,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub offset: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub escalation_rules: Vec<EscalationRule>,
    #[serde(deserialize_with = "null_as_default")]
    pub services: Vec<Service>,
    #[serde(deserialize_with = "null_as_default")]
    pub on_call: Vec<OnCall>,
    #[serde(deserialize_with = "null_as_default")]
    pub num_loops: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationRule {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub escalation_delay_in_minutes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_object: RuleObject,
}

/// 規則的通知對象（user 或 schedule）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleObject {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub object_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "time_zone", deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub integration_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub escalation_policy_id: String,
}

/// 某一層級目前的值班者；永久排班時 start/end 為 null
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnCall {
    #[serde(deserialize_with = "null_as_default")]
    pub level: i64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: OnCallUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnCallUser {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "time_zone", deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"{
        "escalation_policies": [
            {
                "id": "PT20YPA",
                "name": "Ops",
                "num_loops": 2,
                "escalation_rules": [
                    {
                        "id": "PXPGF42",
                        "escalation_delay_in_minutes": 30,
                        "rule_object": {
                            "id": "P4EKUIF",
                            "name": "Primary",
                            "type": "schedule",
                            "email": "",
                            "time_zone": "America/Los_Angeles",
                            "color": "green"
                        }
                    }
                ],
                "services": [
                    {
                        "id": "PIJ90N7",
                        "name": "Database",
                        "integration_email": "db@acme.pagerduty.com",
                        "html_url": "https://acme.pagerduty.com/services/PIJ90N7",
                        "escalation_policy_id": "PT20YPA"
                    }
                ],
                "on_call": [
                    {
                        "level": 1,
                        "start": "2015-03-06T15:28:51-05:00",
                        "end": "2015-03-07T15:28:51-05:00",
                        "user": {
                            "id": "P553OPV",
                            "name": "Alice",
                            "email": "alice@example.com",
                            "time_zone": "Eastern Time (US & Canada)",
                            "color": "dark-slate-grey",
                            "billed": true
                        }
                    },
                    {
                        "level": 2,
                        "start": null,
                        "end": null,
                        "user": {"id": "PDSP8CR", "name": "Bob"}
                    }
                ]
            }
        ],
        "limit": 100,
        "offset": 0,
        "total": 1
    }"##;

    #[test]
    fn test_decode_page_fixture() {
        let page: EscalationPolicyPage = serde_json::from_str(FIXTURE).unwrap();

        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);
        assert_eq!(page.total, 1);
        assert_eq!(page.escalation_policies.len(), 1);

        let policy = &page.escalation_policies[0];
        assert_eq!(policy.id, "PT20YPA");
        assert_eq!(policy.num_loops, 2);
        assert_eq!(policy.escalation_rules[0].escalation_delay_in_minutes, 30);
        assert_eq!(policy.escalation_rules[0].rule_object.object_type, "schedule");
        assert_eq!(
            policy.escalation_rules[0].rule_object.timezone,
            "America/Los_Angeles"
        );
        assert_eq!(policy.services[0].escalation_policy_id, "PT20YPA");

        assert_eq!(policy.on_call.len(), 2);
        assert_eq!(policy.on_call[0].level, 1);
        assert_eq!(policy.on_call[0].user.name, "Alice");
        assert!(policy.on_call[0].start.is_some());

        assert_eq!(policy.on_call[1].level, 2);
        assert!(policy.on_call[1].start.is_none());
        assert_eq!(policy.on_call[1].user.email, "");
    }

    #[test]
    fn test_decode_is_stable() {
        let first: EscalationPolicyPage = serde_json::from_str(FIXTURE).unwrap();
        let second: EscalationPolicyPage = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_fields_use_zero_values() {
        let page: EscalationPolicyPage =
            serde_json::from_str(r#"{"escalation_policies": [{"id": "P1"}]}"#).unwrap();

        assert_eq!(page.total, 0);
        let policy = &page.escalation_policies[0];
        assert_eq!(policy.name, "");
        assert!(policy.escalation_rules.is_empty());
        assert_eq!(policy.num_loops, 0);
    }

    #[test]
    fn test_null_fields_use_zero_values() {
        let page: EscalationPolicyPage = serde_json::from_str(
            r#"{
                "escalation_policies": [{
                    "id": "P1",
                    "name": null,
                    "num_loops": null,
                    "escalation_rules": [{
                        "id": "R1",
                        "escalation_delay_in_minutes": null,
                        "rule_object": {"id": "U1", "type": "user", "email": null, "time_zone": null}
                    }, {
                        "id": "R2",
                        "rule_object": null
                    }],
                    "services": null,
                    "on_call": [{"level": null, "start": null, "end": null, "user": null}]
                }],
                "limit": 100,
                "offset": null,
                "total": 1
            }"#,
        )
        .unwrap();

        assert_eq!(page.offset, 0);
        assert_eq!(page.total, 1);

        let policy = &page.escalation_policies[0];
        assert_eq!(policy.name, "");
        assert_eq!(policy.num_loops, 0);
        assert!(policy.services.is_empty());
        assert_eq!(policy.escalation_rules[0].escalation_delay_in_minutes, 0);
        assert_eq!(policy.escalation_rules[0].rule_object.email, "");
        assert_eq!(policy.escalation_rules[0].rule_object.object_type, "user");
        assert_eq!(policy.escalation_rules[1].rule_object, RuleObject::default());
        assert_eq!(policy.on_call[0].level, 0);
        assert_eq!(policy.on_call[0].user, OnCallUser::default());

        let null_list: EscalationPolicyPage =
            serde_json::from_str(r#"{"escalation_policies": null, "offset": 0, "total": 0}"#)
                .unwrap();
        assert!(null_list.escalation_policies.is_empty());
    }
}
