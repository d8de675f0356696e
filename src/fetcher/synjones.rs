use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use tracing::{debug, error};

use super::payload::{RoomInfoForm, RoomInfoRequest, RoomInfoResponse};
use super::{ElectricitySource, FetchError};
use crate::domain::{campus, Reading, RoomQuery};

/// Query endpoint of the CSUST one-card web service
pub const DEFAULT_QUERY_URL: &str = "http://yktwd.csust.edu.cn:8988/web/Common/Tsm.html";

const ORIGIN_VALUE: &str = "http://yktwd.csust.edu.cn:8988";
const REFERER_VALUE: &str = "http://yktwd.csust.edu.cn:8988/web/common/checkEle.html";

/// Electricity balance client for the Synjones one-card service.
///
/// Each call is a single POST; no caching, no retries, and the HTTP client's
/// default timeout behaviour is left untouched.
#[derive(Clone)]
pub struct SynjonesFetcher {
    query_url: String,
    client: reqwest::Client,
}

impl SynjonesFetcher {
    pub fn new(query_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()?;
        Ok(Self {
            query_url: query_url.into(),
            client,
        })
    }

    /// Run one query and parse the balance out of the reply.
    ///
    /// The body is decoded with the charset named in `Content-Type`
    /// (UTF-8 when none is given).
    pub async fn try_fetch(&self, query: &RoomQuery) -> Result<Reading, FetchError> {
        let aid = campus::lookup(&query.campus)
            .ok_or_else(|| FetchError::UnknownCampus(query.campus.clone()))?;

        let form = RoomInfoForm::new(RoomInfoRequest::new(aid, query));
        debug!(url = %self.query_url, %query, "posting room info query");

        let body = self
            .client
            .post(&self.query_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let resp: RoomInfoResponse = serde_json::from_str(&body)?;
        Ok(Reading::from_message(resp.message()))
    }
}

#[async_trait]
impl ElectricitySource for SynjonesFetcher {
    async fn fetch(&self, query: &RoomQuery) -> Option<Reading> {
        match self.try_fetch(query).await {
            Ok(reading) => Some(reading),
            Err(e) => {
                error!(
                    kind = e.kind(),
                    error = %e,
                    campus = %query.campus,
                    building_id = %query.building_id,
                    room_id = %query.room_id,
                    "electricity query failed"
                );
                None
            }
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_VALUE));
    headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("csust-electricity/0.1"),
    );
    headers
}
