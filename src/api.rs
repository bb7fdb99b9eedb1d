use std::rc::Rc;

use async_trait::async_trait;
use zspace_shared::protocol::{
    BannerListRequest, BrandDetailRequest, BrandListRequest, CategoryListRequest,
    ClassificationRequest, CompanyInfoRequest, ContactLead, LoginRequest,
    ProductBannerListRequest, ProductDetailRequest, ProductRecommendRequest, TagTypesRequest,
    TagsRequest, UpdatePasswordRequest, UpdateUserRequest, UserInfoRequest,
    VerificationCodeRequest,
};
use zspace_shared::{
    Banner, BrandDetail, BrandSummary, CategoryItem, CompanyInfo, LoginResponse, PageRequest,
    PageResult, ProductBanner, ProductCard, ProductDetail, TagRow, UserInfo, VerificationCode,
};

use crate::catalog::query::ProductQuery;
use crate::catalog::taxonomy::{CategoryConfig, transform_classification};
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::request::HttpClient;
use crate::storage::KeyValueStorage;

// =========================================================
// 目录数据源 (Catalog source)
// =========================================================

/// 目录筛选依赖的四个远程接口
///
/// 任何失败都被目录视为"没有数据"。
#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch_classification(&self) -> ApiResult<Vec<CategoryConfig>>;
    async fn fetch_tags(&self) -> ApiResult<Vec<TagRow>>;
    async fn get_brand_list(&self, page: PageRequest) -> ApiResult<PageResult<BrandSummary>>;
    async fn get_product_list(&self, query: &ProductQuery) -> ApiResult<PageResult<ProductCard>>;
}

#[async_trait(?Send)]
impl<T: CatalogSource + ?Sized> CatalogSource for Rc<T> {
    async fn fetch_classification(&self) -> ApiResult<Vec<CategoryConfig>> {
        (**self).fetch_classification().await
    }

    async fn fetch_tags(&self) -> ApiResult<Vec<TagRow>> {
        (**self).fetch_tags().await
    }

    async fn get_brand_list(&self, page: PageRequest) -> ApiResult<PageResult<BrandSummary>> {
        (**self).get_brand_list(page).await
    }

    async fn get_product_list(&self, query: &ProductQuery) -> ApiResult<PageResult<ProductCard>> {
        (**self).get_product_list(query).await
    }
}

// =========================================================
// 远程接口 (Remote accessors)
// =========================================================

/// 站点用到的全部远程接口
#[derive(Clone)]
pub struct ZSpaceApi<C, S> {
    client: ApiClient<C, S>,
}

impl<C, S> ZSpaceApi<C, S>
where
    C: HttpClient,
    S: KeyValueStorage,
{
    pub fn new(client: ApiClient<C, S>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<C, S> {
        &self.client
    }

    // --- 页面配置 ---

    /// 分类，已按 `largeCategory` 顺序转换为 `CategoryConfig`
    pub async fn fetch_classification(&self) -> ApiResult<Vec<CategoryConfig>> {
        let payload = self.client.call(&ClassificationRequest::new()).await?;
        Ok(transform_classification(payload))
    }

    pub async fn fetch_tags(&self) -> ApiResult<Vec<TagRow>> {
        self.client.call(&TagsRequest::new()).await
    }

    pub async fn fetch_tag_types(&self) -> ApiResult<Vec<serde_json::Value>> {
        self.client.call(&TagTypesRequest::new()).await
    }

    pub async fn get_banner_list(&self) -> ApiResult<Vec<Banner>> {
        self.client.call(&BannerListRequest::new()).await
    }

    pub async fn get_product_banner_list(&self) -> ApiResult<Vec<ProductBanner>> {
        self.client.call(&ProductBannerListRequest::new()).await
    }

    pub async fn fetch_company_info(&self) -> ApiResult<CompanyInfo> {
        self.client.call(&CompanyInfoRequest::new()).await
    }

    pub async fn fetch_category_list(&self) -> ApiResult<Vec<CategoryItem>> {
        self.client.call(&CategoryListRequest::new()).await
    }

    // --- 商品 ---

    pub async fn get_product_list(&self, query: &ProductQuery) -> ApiResult<PageResult<ProductCard>> {
        self.client.call(query).await
    }

    pub async fn get_product_recommend(
        &self,
        req: &ProductRecommendRequest,
    ) -> ApiResult<PageResult<ProductCard>> {
        self.client.call(req).await
    }

    pub async fn get_product_detail(&self, id: &str) -> ApiResult<ProductDetail> {
        let req = ProductDetailRequest { id: id.to_string() };
        self.client
            .call(&req)
            .await
            .map_err(|e| e.in_op_with("product.detail.load", id))
    }

    // --- 品牌 ---

    pub async fn get_brand_list(&self, page: PageRequest) -> ApiResult<PageResult<BrandSummary>> {
        self.client.call(&BrandListRequest { page }).await
    }

    pub async fn get_brand_detail(&self, id: &str) -> ApiResult<BrandDetail> {
        let req = BrandDetailRequest { id: id.to_string() };
        self.client
            .call(&req)
            .await
            .map_err(|e| e.in_op_with("brand.detail.load", id))
    }

    // --- 线索 ---

    pub async fn save_contact_us(&self, lead: &ContactLead) -> ApiResult<()> {
        self.client.call(lead).await.map(|_| ())
    }

    // --- 认证与用户 ---

    pub async fn get_verification_code(&self, phone: &str) -> ApiResult<VerificationCode> {
        let req = VerificationCodeRequest {
            phone: phone.to_string(),
        };
        self.client.call(&req).await
    }

    pub async fn login(&self, phone: &str, code: &str) -> ApiResult<LoginResponse> {
        self.client.call(&LoginRequest::with_code(phone, code)).await
    }

    pub async fn get_user_info(&self) -> ApiResult<UserInfo> {
        self.client.call(&UserInfoRequest {}).await
    }

    pub async fn update_user(&self, req: &UpdateUserRequest) -> ApiResult<()> {
        self.client.call(req).await.map(|_| ())
    }

    pub async fn update_password(&self, req: &UpdatePasswordRequest) -> ApiResult<()> {
        self.client.call(req).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl<C, S> CatalogSource for ZSpaceApi<C, S>
where
    C: HttpClient,
    S: KeyValueStorage,
{
    async fn fetch_classification(&self) -> ApiResult<Vec<CategoryConfig>> {
        ZSpaceApi::fetch_classification(self).await
    }

    async fn fetch_tags(&self) -> ApiResult<Vec<TagRow>> {
        ZSpaceApi::fetch_tags(self).await
    }

    async fn get_brand_list(&self, page: PageRequest) -> ApiResult<PageResult<BrandSummary>> {
        ZSpaceApi::get_brand_list(self, page).await
    }

    async fn get_product_list(&self, query: &ProductQuery) -> ApiResult<PageResult<ProductCard>> {
        ZSpaceApi::get_product_list(self, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::storage::MemoryStorage;
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn api() -> (ZSpaceApi<Rc<MockHttpClient>, MemoryStorage>, Rc<MockHttpClient>) {
        let http = Rc::new(MockHttpClient::new());
        let config = ClientConfig {
            base_url: BASE.to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(http.clone(), MemoryStorage::new(), config);
        (ZSpaceApi::new(client), http)
    }

    fn url(path: &str) -> String {
        format!("{BASE}{path}")
    }

    #[tokio::test]
    async fn classification_is_transformed() {
        let (api, http) = api();
        http.mock_ok(
            &url("/fr/page/pageConfiguration"),
            json!({
                "category": { "灯具": ["吊灯"], "配饰": ["花瓶"] },
                "brand": { "灯具": ["Flos"] },
                "largeCategory": ["灯具", "配饰"]
            }),
        );

        let configs = CatalogSource::fetch_classification(&api).await.unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].category, "lighting");
        assert_eq!(configs[0].brands, ["Flos"]);
        assert_eq!(configs[1].category, "decor");
        assert_eq!(configs[1].categories, ["花瓶"]);

        let sent = http.last_request();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(
            sent.query,
            vec![("pageCode".to_string(), "Classification".to_string())]
        );
    }

    #[tokio::test]
    async fn tags_accept_loose_rows() {
        let (api, http) = api();
        http.mock_ok(
            &url("/fr/page/pageConfiguration"),
            json!([
                { "type": "场景", "name": "客厅" },
                { "type": "功能", "name": "调光", "category": "灯具" },
                { "name": 42 }
            ]),
        );

        let rows = api.fetch_tags().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].category, ["灯具"]);
        assert_eq!(rows[2].tag_type, None);
        assert_eq!(rows[2].name, "42");
    }

    #[tokio::test]
    async fn product_list_posts_query() {
        let (api, http) = api();
        http.mock_ok(
            &url("/fr/product/productCardList"),
            json!({ "records": [{ "id": 7, "productName": "Arco", "retailPrice": 12800 }], "total": 1 }),
        );

        let query = ProductQuery::from_state(
            &crate::catalog::filter::FilterState::new(Some("lighting".into())),
            "灯具",
        );
        let page = api.get_product_list(&query).await.unwrap();
        assert_eq!(page.records[0].id, "7");
        assert_eq!(page.records[0].retail_price.as_deref(), Some("12800"));

        let body = http.last_request().body_json();
        assert_eq!(body["largeCategory"], "灯具");
        assert_eq!(body["pageSize"], 99999);
        assert!(body.get("tagsByType").is_none());
    }

    #[tokio::test]
    async fn login_returns_token() {
        let (api, http) = api();
        http.mock_ok(&url("/fr/auth/login"), json!({ "token": "abc" }));

        let resp = api.login("13800000000", "1234").await.unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(http.last_request().body_json()["loginType"], "verificationCode");
    }

    #[tokio::test]
    async fn detail_errors_carry_id() {
        let (api, http) = api();
        http.mock_response(
            &url("/fr/product/productDetail"),
            200,
            json!({ "code": 404, "message": "商品不存在" }),
        );

        let err = api.get_product_detail("99").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "[API_REJECTED] 商品不存在 (code 404) | trace: product.detail -> product.detail.load(99)"
        );
    }
}
