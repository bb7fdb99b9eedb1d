use crate::{
    Banner, BrandDetail, BrandSummary, CategoryItem, ClassificationPayload, CompanyInfo,
    LoginResponse, PageRequest, PageResult, ProductBanner, ProductCard, ProductDetail, TagRow,
    UserInfo, VerificationCode,
};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods used by the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// GET requests send their fields as query parameters, POST requests as a JSON body.
pub trait ApiRequest: Serialize {
    /// The type decoded from the envelope's `data`.
    type Response: DeserializeOwned;
    /// The URL path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Operation name used in error traces and logs.
    const OPERATION: &'static str;
}

// =========================================================
// 页面配置 (pageConfiguration)
// =========================================================

pub const PAGE_CONFIGURATION_PATH: &str = "/fr/page/pageConfiguration";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageCode {
    Classification,
    #[serde(rename = "tags")]
    Tags,
    #[serde(rename = "tagTypes")]
    TagTypes,
    Banner,
    ProductBanner,
    CompanyInfo,
    Category,
}

macro_rules! page_configuration {
    ($(#[$meta:meta])* $name:ident => $code:ident, $response:ty, $op:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            page_code: PageCode,
        }

        impl $name {
            pub const fn new() -> Self {
                Self {
                    page_code: PageCode::$code,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ApiRequest for $name {
            type Response = $response;
            const PATH: &'static str = PAGE_CONFIGURATION_PATH;
            const METHOD: HttpMethod = HttpMethod::Get;
            const OPERATION: &'static str = $op;
        }
    };
}

page_configuration!(
    /// 产品分类（大类 -> 品类 / 品牌）
    ClassificationRequest => Classification, ClassificationPayload, "page.classification"
);
page_configuration!(
    /// 标签列表
    TagsRequest => Tags, Vec<TagRow>, "page.tags"
);
page_configuration!(
    /// 标签类型列表（结构由后台配置决定）
    TagTypesRequest => TagTypes, Vec<serde_json::Value>, "page.tag_types"
);
page_configuration!(
    /// 首页轮播
    BannerListRequest => Banner, Vec<Banner>, "page.banner"
);
page_configuration!(
    /// 首页产品橱窗
    ProductBannerListRequest => ProductBanner, Vec<ProductBanner>, "page.product_banner"
);
page_configuration!(
    /// 公司信息
    CompanyInfoRequest => CompanyInfo, CompanyInfo, "page.company_info"
);
page_configuration!(
    /// 品类列表
    CategoryListRequest => Category, Vec<CategoryItem>, "page.category"
);

// =========================================================
// 商品 (Products)
// =========================================================

/// 产品推荐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendRequest {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ApiRequest for ProductRecommendRequest {
    type Response = PageResult<ProductCard>;
    const PATH: &'static str = "/fr/product/productList";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "product.recommend";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetailRequest {
    pub id: String,
}

impl ApiRequest for ProductDetailRequest {
    type Response = ProductDetail;
    const PATH: &'static str = "/fr/product/productDetail";
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "product.detail";
}

// =========================================================
// 品牌 (Brands)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandListRequest {
    #[serde(flatten)]
    pub page: PageRequest,
}

impl ApiRequest for BrandListRequest {
    type Response = PageResult<BrandSummary>;
    const PATH: &'static str = "/fr/brand/list";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "brand.list";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDetailRequest {
    pub id: String,
}

impl ApiRequest for BrandDetailRequest {
    type Response = BrandDetail;
    const PATH: &'static str = "/fr/brand/detail";
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "brand.detail";
}

// =========================================================
// 联系线索 (Contact leads)
// =========================================================

/// 联系我们表单
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLead {
    pub contact_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate_name: Option<String>,
}

impl ApiRequest for ContactLead {
    type Response = IgnoredAny;
    const PATH: &'static str = "/fr/contactUs/save";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "contact.save";
}

// =========================================================
// 认证与用户 (Auth & User)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCodeRequest {
    pub phone: String,
}

impl ApiRequest for VerificationCodeRequest {
    type Response = VerificationCode;
    const PATH: &'static str = "/fr/auth/getVerificationCode";
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "auth.verification_code";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginType {
    VerificationCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone: String,
    pub verification_code: String,
    pub login_type: LoginType,
}

impl LoginRequest {
    pub fn with_code(phone: impl Into<String>, verification_code: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            verification_code: verification_code.into(),
            login_type: LoginType::VerificationCode,
        }
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/fr/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "auth.login";
}

/// 当前用户（身份由 Bearer token 决定）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UserInfoRequest {}

impl ApiRequest for UserInfoRequest {
    type Response = UserInfo;
    const PATH: &'static str = "/fr/user/me";
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "user.me";
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ApiRequest for UpdateUserRequest {
    type Response = IgnoredAny;
    const PATH: &'static str = "/fr/user/update";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "user.update";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl ApiRequest for UpdatePasswordRequest {
    type Response = IgnoredAny;
    const PATH: &'static str = "/fr/user/updatePwd";
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "user.update_password";
}
