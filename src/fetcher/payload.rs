//! Wire shapes of the one-card `query.elec.roominfo` call.

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{campus, RoomQuery};

/// Remote procedure name sent in the `funname` form field
pub const FUNNAME: &str = "synjones.onecard.query.elec.roominfo";

/// The upstream expects an account field but ignores its value for room
/// queries; the same placeholder is always sent.
pub const ACCOUNT_PLACEHOLDER: &str = "000001";

/// Text used when the reply carries no balance message
pub const UNKNOWN_BALANCE: &str = "未知电量";

/// Form body posted to the endpoint
#[derive(Debug, Serialize)]
pub struct RoomInfoForm<'a> {
    #[serde(serialize_with = "as_json_text")]
    pub jsondata: RoomInfoRequest<'a>,
    pub funname: &'static str,
    pub json: &'static str,
}

impl<'a> RoomInfoForm<'a> {
    pub fn new(request: RoomInfoRequest<'a>) -> Self {
        Self {
            jsondata: request,
            funname: FUNNAME,
            json: "true",
        }
    }
}

/// `jsondata` travels as JSON text inside a form field
fn as_json_text<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let text = serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomInfoRequest<'a> {
    pub query_elec_roominfo: RoomInfoQuery<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomInfoQuery<'a> {
    pub aid: &'a str,
    pub account: &'static str,
    pub room: Room<'a>,
    pub floor: Floor,
    pub area: Area,
    pub building: Building<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room<'a> {
    pub roomid: &'a str,
    pub room: &'a str,
}

/// Not needed for room queries, always sent empty
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Floor {
    pub floorid: String,
    pub floor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub area: String,
    pub areaname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building<'a> {
    pub buildingid: &'a str,
    pub building: &'static str,
}

impl<'a> RoomInfoRequest<'a> {
    pub fn new(aid: &'a str, query: &'a RoomQuery) -> Self {
        let area = campus::area_name(&query.campus);
        Self {
            query_elec_roominfo: RoomInfoQuery {
                aid,
                account: ACCOUNT_PLACEHOLDER,
                room: Room {
                    roomid: &query.room_id,
                    room: &query.room_id,
                },
                floor: Floor::default(),
                area: Area {
                    area: area.clone(),
                    areaname: area,
                },
                building: Building {
                    buildingid: &query.building_id,
                    building: "",
                },
            },
        }
    }
}

/// Reply body; everything except the balance message is ignored
#[derive(Debug, Default, Deserialize)]
pub struct RoomInfoResponse {
    #[serde(default)]
    pub query_elec_roominfo: Option<RoomInfoResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomInfoResult {
    #[serde(default)]
    pub errmsg: Option<String>,
}

impl RoomInfoResponse {
    /// Balance message, or [`UNKNOWN_BALANCE`] when the reply has none
    pub fn message(&self) -> &str {
        self.query_elec_roominfo
            .as_ref()
            .and_then(|r| r.errmsg.as_deref())
            .unwrap_or(UNKNOWN_BALANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let query = RoomQuery::new("云塘", "12", "305");
        let request = RoomInfoRequest::new("0030000000002501", &query);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "query_elec_roominfo": {
                    "aid": "0030000000002501",
                    "account": "000001",
                    "room": {"roomid": "305", "room": "305"},
                    "floor": {"floorid": "", "floor": ""},
                    "area": {"area": "云塘校区", "areaname": "云塘校区"},
                    "building": {"buildingid": "12", "building": ""}
                }
            })
        );
    }

    #[test]
    fn test_request_field_order() {
        let query = RoomQuery::new("金盆岭", "B3", "101");
        let request = RoomInfoRequest::new("0030000000002502", &query);
        let text = serde_json::to_string(&request).unwrap();

        let aid = text.find("\"aid\"").unwrap();
        let account = text.find("\"account\"").unwrap();
        let building = text.find("\"building\"").unwrap();
        assert!(aid < account && account < building);
    }

    #[test]
    fn test_form_embeds_json_text() {
        let query = RoomQuery::new("云塘", "12", "305");
        let form = RoomInfoForm::new(RoomInfoRequest::new("0030000000002501", &query));

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["funname"], FUNNAME);
        assert_eq!(value["json"], "true");

        let embedded: serde_json::Value =
            serde_json::from_str(value["jsondata"].as_str().unwrap()).unwrap();
        assert_eq!(embedded["query_elec_roominfo"]["aid"], "0030000000002501");
    }

    #[test]
    fn test_response_message() {
        let body = r#"{"query_elec_roominfo":{"retcode":"0","errmsg":"房间当前剩余电量15.5"}}"#;
        let resp: RoomInfoResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.message(), "房间当前剩余电量15.5");
    }

    #[test]
    fn test_response_without_message_uses_placeholder() {
        let resp: RoomInfoResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.message(), UNKNOWN_BALANCE);

        let resp: RoomInfoResponse =
            serde_json::from_str(r#"{"query_elec_roominfo":{"retcode":"1"}}"#).unwrap();
        assert_eq!(resp.message(), UNKNOWN_BALANCE);
    }

    #[test]
    fn test_response_of_wrong_shape_is_rejected() {
        assert!(serde_json::from_str::<RoomInfoResponse>("[1, 2]").is_err());
        assert!(serde_json::from_str::<RoomInfoResponse>(
            r#"{"query_elec_roominfo":{"errmsg":12}}"#
        )
        .is_err());
    }
}
