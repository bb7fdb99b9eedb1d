use leptos::prelude::*;
use leptos::task::spawn_local;
use zspace::forms::{INVALID_PHONE_MESSAGE, LoginForm, Notice, SYSTEM_ERROR_MESSAGE};

use crate::components::widgets::Toast;
use crate::state::use_app_state;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 手机号 + 图片验证码登录
///
/// 登录成功后由路由守卫离开本页。
#[component]
pub fn AuthPage() -> impl IntoView {
    let app = use_app_state();
    let router = use_router();

    let form = RwSignal::new(LoginForm::default());
    let (captcha, set_captcha) = signal(Option::<String>::None);
    let (is_requesting, set_is_requesting) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let warn = move |text: &str| notice.set(Some(Notice::Warning(text.to_string())));

    let on_request_code = move |_: web_sys::MouseEvent| {
        let draft = form.get_untracked();
        if !draft.phone_is_valid() {
            warn(INVALID_PHONE_MESSAGE);
            return;
        }
        set_is_requesting.set(true);
        spawn_local(async move {
            match draft.request_code(&app.api()).await {
                Ok(code) => set_captcha.set(code.verify_images),
                Err(e) => warn(e.user_message(SYSTEM_ERROR_MESSAGE)),
            }
            set_is_requesting.set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);

        let draft = form.get_untracked();
        spawn_local(async move {
            match app.login(draft).await {
                Ok(()) => {
                    notice.set(Some(Notice::Success("登录成功".to_string())));
                    router.go(AppRoute::auth_success_redirect());
                }
                Err(e) => warn(e.user_message(SYSTEM_ERROR_MESSAGE)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gradient-to-b from-brand-600 to-brand-700 pt-20 px-4">
            <Toast notice=notice />
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h1 class="text-3xl font-bold text-center text-brand-700">"登录 / 注册"</h1>
                    <p class="text-center text-base-content/70 mb-4">"未注册的手机号验证后将自动创建账号"</p>

                    <div class="form-control">
                        <label class="label" for="phone">
                            <span class="label-text">"手机号"</span>
                        </label>
                        <input
                            id="phone"
                            type="tel"
                            maxlength="11"
                            placeholder="请输入手机号"
                            class="input input-bordered"
                            prop:value=move || form.with(|f| f.phone.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.phone = value);
                            }
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="code">
                            <span class="label-text">"验证码"</span>
                        </label>
                        <div class="flex gap-2">
                            <input
                                id="code"
                                type="text"
                                placeholder="请输入验证码"
                                class="input input-bordered flex-1"
                                prop:value=move || form.with(|f| f.verification_code.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.verification_code = value);
                                }
                            />
                            <button
                                type="button"
                                class="btn btn-outline border-brand-600 text-brand-600"
                                disabled=move || is_requesting.get()
                                on:click=on_request_code
                            >
                                {move || if captcha.with(Option::is_some) { "换一张" } else { "获取验证码" }}
                            </button>
                        </div>
                        {move || captcha.get().map(|src| view! {
                            <img src=src alt="验证码" class="h-12 mt-3 self-start rounded border cursor-pointer" on:click=on_request_code />
                        })}
                    </div>

                    <div class="form-control mt-6">
                        <button class="btn bg-brand-600 text-white" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                            } else {
                                "登录".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
