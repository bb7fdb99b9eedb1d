use tracing::info;
use zspace_shared::VerificationCode;
use zspace_shared::protocol::ContactLead;

use crate::api::ZSpaceApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::storage::KeyValueStorage;
use crate::store::AppStore;

pub const SYSTEM_ERROR_MESSAGE: &str = "系统错误，请稍后再试";
pub const CONTACT_SUCCESS_MESSAGE: &str = "提交成功，我们会尽快与您取得联系";
pub const INVALID_PHONE_MESSAGE: &str = "请输入 11 位手机号";

/// 表单提交后给用户的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Warning(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}

/// 中国大陆手机号：1 开头，第二位 3-9，共 11 位数字
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(u8::is_ascii_digit)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =========================================================
// 联系我们 (Contact form)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub corporate_name: String,
}

impl ContactForm {
    /// 姓名与电话必填，邮箱与公司名留空时不提交
    pub fn to_lead(&self) -> ApiResult<ContactLead> {
        let contact_name = non_blank(&self.contact_name)
            .ok_or_else(|| ApiError::validation("请填写您的姓名"))?;
        let phone = non_blank(&self.phone).ok_or_else(|| ApiError::validation("请填写联系电话"))?;

        Ok(ContactLead {
            contact_name,
            phone,
            email: non_blank(&self.email),
            corporate_name: non_blank(&self.corporate_name),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub async fn submit<C, S>(&self, api: &ZSpaceApi<C, S>) -> ApiResult<()>
    where
        C: HttpClient,
        S: KeyValueStorage,
    {
        let lead = self.to_lead()?;
        api.save_contact_us(&lead).await
    }

    /// 处理提交结果：成功清空表单，失败保留输入并给出服务端提示
    pub fn finish(&mut self, result: ApiResult<()>) -> Notice {
        match result {
            Ok(()) => {
                self.reset();
                Notice::Success(CONTACT_SUCCESS_MESSAGE.to_string())
            }
            Err(e) => Notice::Warning(e.user_message(SYSTEM_ERROR_MESSAGE).to_string()),
        }
    }
}

// =========================================================
// 登录 (Login form)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub phone: String,
    pub verification_code: String,
}

impl LoginForm {
    pub fn phone_is_valid(&self) -> bool {
        is_valid_phone(self.phone.trim())
    }

    /// 请求图片验证码；手机号无效时不发请求
    pub async fn request_code<C, S>(&self, api: &ZSpaceApi<C, S>) -> ApiResult<VerificationCode>
    where
        C: HttpClient,
        S: KeyValueStorage,
    {
        if !self.phone_is_valid() {
            return Err(ApiError::validation(INVALID_PHONE_MESSAGE));
        }
        api.get_verification_code(self.phone.trim()).await
    }

    /// 登录并把 token 写入全局状态
    pub async fn login<C, S>(&self, api: &ZSpaceApi<C, S>, store: &AppStore<S>) -> ApiResult<()>
    where
        C: HttpClient,
        S: KeyValueStorage,
    {
        if !self.phone_is_valid() {
            return Err(ApiError::validation(INVALID_PHONE_MESSAGE));
        }
        let code = non_blank(&self.verification_code)
            .ok_or_else(|| ApiError::validation("请输入验证码"))?;

        let resp = api.login(self.phone.trim(), &code).await?;
        store.set_token(&resp.token)?;
        info!("login succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiClient, TOKEN_STORAGE_KEY};
    use crate::config::ClientConfig;
    use crate::request::MockHttpClient;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::rc::Rc;

    const BASE: &str = "http://api.test";

    fn api() -> (ZSpaceApi<Rc<MockHttpClient>, MemoryStorage>, Rc<MockHttpClient>, MemoryStorage) {
        let http = Rc::new(MockHttpClient::new());
        let storage = MemoryStorage::new();
        let config = ClientConfig {
            base_url: BASE.to_string(),
            ..ClientConfig::default()
        };
        let api = ZSpaceApi::new(ApiClient::new(http.clone(), storage.clone(), config));
        (api, http, storage)
    }

    fn filled() -> ContactForm {
        ContactForm {
            contact_name: "张三".into(),
            phone: "13800000000".into(),
            email: " ".into(),
            corporate_name: "ZSPACE".into(),
        }
    }

    #[test]
    fn phone_rule() {
        assert!(is_valid_phone("13800000000"));
        assert!(is_valid_phone("19912345678"));
        assert!(!is_valid_phone("12800000000"));
        assert!(!is_valid_phone("1380000000"));
        assert!(!is_valid_phone("138000000001"));
        assert!(!is_valid_phone("1380000000a"));
        assert!(!is_valid_phone("１３８００００００００"));
    }

    #[test]
    fn lead_requires_name_and_phone() {
        let mut form = filled();
        let lead = form.to_lead().unwrap();
        assert_eq!(lead.email, None);
        assert_eq!(lead.corporate_name.as_deref(), Some("ZSPACE"));

        form.contact_name.clear();
        assert!(form.to_lead().is_err());
    }

    #[tokio::test]
    async fn successful_submit_clears_form() {
        let (api, http, _) = api();
        http.mock_ok(&format!("{BASE}/fr/contactUs/save"), json!(null));

        let mut form = filled();
        let result = form.submit(&api).await;
        let notice = form.finish(result);

        assert_eq!(notice, Notice::Success(CONTACT_SUCCESS_MESSAGE.into()));
        assert_eq!(form, ContactForm::default());
        assert_eq!(
            http.last_request().body_json(),
            json!({ "contactName": "张三", "phone": "13800000000", "corporateName": "ZSPACE" })
        );
    }

    #[tokio::test]
    async fn rejected_submit_keeps_input_and_server_message() {
        let (api, http, _) = api();
        http.mock_response(
            &format!("{BASE}/fr/contactUs/save"),
            200,
            json!({ "code": 400, "msg": "该手机号今日已提交" }),
        );

        let mut form = filled();
        let result = form.submit(&api).await;
        let notice = form.finish(result);

        assert!(!notice.is_success());
        assert!(notice.text().contains("该手机号今日已提交"));
        assert_eq!(form, filled());
    }

    #[tokio::test]
    async fn transport_failure_uses_fallback_message() {
        let (api, http, _) = api();
        http.mock_failure(
            &format!("{BASE}/fr/contactUs/save"),
            ApiError::transport("connection refused"),
        );

        let mut form = filled();
        let result = form.submit(&api).await;
        assert_eq!(form.finish(result).text(), SYSTEM_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn code_request_skipped_for_invalid_phone() {
        let (api, http, _) = api();
        let form = LoginForm {
            phone: "123".into(),
            ..LoginForm::default()
        };
        let err = form.request_code(&api).await.unwrap_err();
        assert_eq!(err.user_message(""), INVALID_PHONE_MESSAGE);
        assert!(http.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn login_stores_token() {
        let (api, http, storage) = api();
        http.mock_ok(
            &format!("{BASE}/fr/auth/getVerificationCode"),
            json!({ "verifyImages": "data:image/png;base64,AAAA" }),
        );
        http.mock_ok(&format!("{BASE}/fr/auth/login"), json!({ "token": "tok" }));
        let store = AppStore::load(storage.clone());

        let form = LoginForm {
            phone: "13800000000".into(),
            verification_code: "ab12".into(),
        };
        let code = form.request_code(&api).await.unwrap();
        assert!(code.verify_images.unwrap().starts_with("data:image"));

        form.login(&api, &store).await.unwrap();
        assert!(store.is_logged_in());
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).as_deref(), Some("tok"));
    }
}
