use dropnav_core::{Config, Error, PanelId, Role};
use dropnav_ui::Dropdown;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
    <nav>
        <a id="link-0" data-attribute="dropdown-link">Products</a>
        <a id="link-1" data-attribute="dropdown-link">Company</a>
    </nav>
    <div id="wrap" data-attribute="dropdown-wrap">
        <div id="bg" data-attribute="dropdown-bg"></div>
        <div id="content-0" data-attribute="dropdown-content">Products</div>
        <div id="content-1" data-attribute="dropdown-content">Company</div>
    </div>
    <p id="outside">Elsewhere</p>
"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_page(html: &str) -> Document {
    let document = document();
    document.body().unwrap().set_inner_html(html);
    document
}

fn elem(id: &str) -> HtmlElement {
    document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn style(id: &str, property: &str) -> String {
    elem(id).style().get_property_value(property).unwrap()
}

fn is_active(id: &str) -> bool {
    elem(id).class_list().contains("active")
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn missing_wrap() {
    let document = set_page(
        r#"
        <a id="link-0" data-attribute="dropdown-link">Products</a>
        <div data-attribute="dropdown-bg"></div>
        <div id="content-0" data-attribute="dropdown-content">Products</div>
    "#,
    );

    let result = Dropdown::attach(&document, Config::default());
    assert!(matches!(
        result,
        Err(Error::MissingElement { role: Role::Wrap })
    ));

    elem("link-0").click();
    assert!(!is_active("content-0"));
    assert_eq!(style("content-0", "pointer-events"), "");
}

#[wasm_bindgen_test]
fn missing_background() {
    let document = set_page(
        r#"
        <div data-attribute="dropdown-wrap"></div>
    "#,
    );

    assert!(matches!(
        Dropdown::attach(&document, Config::default()),
        Err(Error::MissingElement {
            role: Role::Background
        })
    ));
}

#[wasm_bindgen_test]
fn mismatched_pairs() {
    let document = set_page(
        r#"
        <a data-attribute="dropdown-link">A</a>
        <a data-attribute="dropdown-link">B</a>
        <div data-attribute="dropdown-wrap">
            <div data-attribute="dropdown-bg"></div>
            <div data-attribute="dropdown-content">A</div>
        </div>
    "#,
    );

    assert!(matches!(
        Dropdown::attach(&document, Config::default()),
        Err(Error::PairingMismatch {
            triggers: 2,
            contents: 1
        })
    ));
}

#[wasm_bindgen_test]
fn invalid_wrap_config() {
    let document = set_page(
        r#"
        <div data-attribute="dropdown-wrap" data-dropdown-config='{ "content_ease": "wobble" }'>
            <div data-attribute="dropdown-bg"></div>
        </div>
    "#,
    );

    assert!(matches!(
        Dropdown::attach(&document, Config::default()),
        Err(Error::InvalidConfig(_))
    ));
}

#[wasm_bindgen_test]
fn initial_state() {
    let document = set_page(PAGE);
    let dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    assert_eq!(style("wrap", "display"), "none");
    assert_eq!(style("content-0", "opacity"), "0");
    assert_eq!(style("content-1", "transform"), "translateY(-6px)");
    assert_eq!(style("bg", "height"), "0rem");
    assert_eq!(dropdown.open_panel(), None);
    assert!(!dropdown.background_visible());
}

#[wasm_bindgen_test]
fn toggle() {
    let document = set_page(PAGE);
    let dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    elem("link-1").click();
    assert_eq!(dropdown.open_panel(), Some(PanelId::from(1)));
    assert!(dropdown.background_visible());
    assert_eq!(style("wrap", "display"), "flex");

    elem("link-1").click();
    assert_eq!(dropdown.open_panel(), None);
    assert!(!dropdown.background_visible());

    for content in ["content-0", "content-1"] {
        assert!(!is_active(content));
        assert_eq!(style(content, "pointer-events"), "none");
        assert_eq!(style(content, "z-index"), "0");
    }
}

#[wasm_bindgen_test]
fn click_inside_content_keeps_it_open() {
    let document = set_page(PAGE);
    let dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    elem("link-0").click();
    elem("content-0").click();

    assert_eq!(dropdown.open_panel(), Some(PanelId::from(0)));
}

#[wasm_bindgen_test]
fn click_outside_closes() {
    let document = set_page(PAGE);
    let dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    elem("link-0").click();
    elem("outside").click();

    assert_eq!(dropdown.open_panel(), None);
}

#[wasm_bindgen_test]
async fn reveal_marks_content() {
    let document = set_page(PAGE);
    let dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    elem("link-0").click();
    sleep(900).await;

    assert!(is_active("content-0"));
    assert_eq!(style("content-0", "pointer-events"), "auto");
    assert_eq!(style("content-0", "z-index"), "1");
    assert_eq!(style("content-0", "opacity"), "1");
    assert_eq!(style("bg", "height"), "42rem");
    assert_eq!(elem("link-0").get_attribute("aria-expanded").unwrap(), "true");

    elem("link-1").click();
    sleep(900).await;

    assert!(!is_active("content-0"));
    assert!(is_active("content-1"));
    assert_eq!(style("wrap", "display"), "flex");
    assert_eq!(elem("link-0").get_attribute("aria-expanded").unwrap(), "false");
    drop(dropdown);
}

#[wasm_bindgen_test]
async fn wrap_hides_after_close() {
    let document = set_page(PAGE);
    let dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    elem("link-0").click();
    sleep(900).await;
    elem("outside").click();

    assert_eq!(style("wrap", "display"), "flex");
    sleep(900).await;
    assert_eq!(style("wrap", "display"), "none");
    assert_eq!(style("bg", "height"), "0rem");
    drop(dropdown);
}

#[wasm_bindgen_test]
async fn reopen_cancels_wrap_hide() {
    let document = set_page(PAGE);
    let _dropdown = Dropdown::attach(&document, Config::default()).unwrap();

    elem("link-0").click();
    sleep(100).await;
    elem("outside").click();
    sleep(300).await;
    elem("link-1").click();
    sleep(700).await;

    assert_eq!(style("wrap", "display"), "flex");
    assert!(is_active("content-1"));
}

#[wasm_bindgen_test]
fn detach_on_drop() {
    let document = set_page(PAGE);
    drop(Dropdown::attach(&document, Config::default()).unwrap());

    elem("link-0").click();

    assert_eq!(style("wrap", "display"), "none");
}
