use pagehands_protocols::ElementRef;

use super::*;
use crate::fake_dom::FakeElement;

#[test]
fn test_form_description_lists_fields() {
    let form: ElementRef = FakeElement::new("form")
        .with_attr("aria-label", "Product search")
        .with_child(FakeElement::new("input").with_attr("name", "query"))
        .with_child(FakeElement::new("select").with_attr("name", "category"))
        .with_child(
            FakeElement::new("input")
                .with_attr("name", "maxPrice")
                .with_attr("type", "number"),
        );

    let description = DescriptionGenerator::form(&form);
    assert!(description.contains("Product search"));
    assert!(description.contains("query"));
    assert!(description.contains("category"));
    assert!(description.contains("maxPrice"));
}

#[test]
fn test_form_description_caps_field_list_at_five() {
    let mut form = FakeElement::new("form");
    for i in 0..8 {
        form = form.with_child(FakeElement::new("input").with_attr("name", &format!("field{i}")));
    }
    let form: ElementRef = form;

    let description = DescriptionGenerator::form(&form);
    assert!(description.contains("field4"));
    assert!(!description.contains("field5"));
}

#[test]
fn test_form_description_skips_hidden_and_submit() {
    let form: ElementRef = FakeElement::new("form")
        .with_child(
            FakeElement::new("input")
                .with_attr("type", "hidden")
                .with_attr("name", "csrf"),
        )
        .with_child(
            FakeElement::new("input")
                .with_attr("type", "submit")
                .with_attr("name", "go"),
        )
        .with_child(FakeElement::new("input").with_attr("name", "query"));

    let description = DescriptionGenerator::form(&form);
    assert!(!description.contains("csrf"));
    assert!(!description.contains("go"));
    assert!(description.contains("query"));
}

#[test]
fn test_form_description_without_label_or_fields() {
    let form: ElementRef = FakeElement::new("form");
    assert_eq!(DescriptionGenerator::form(&form), "Submit this form");
}

#[test]
fn test_button_description_truncates_label() {
    let long_label = "Confirm and place your order right now before the offer expires forever";
    let button: ElementRef = FakeElement::new("button").with_text(long_label);

    let description = DescriptionGenerator::button(&button);
    assert!(description.starts_with("Click the '"));
    assert!(description.len() < long_label.len() + 20);
}

#[test]
fn test_link_description_falls_back_to_href() {
    let link: ElementRef = FakeElement::new("a").with_attr("href", "/cart");
    assert_eq!(DescriptionGenerator::link(&link), "Navigate to /cart");
}

#[test]
fn test_link_description_prefers_text() {
    let link: ElementRef = FakeElement::new("a")
        .with_attr("href", "/cart")
        .with_text("View cart");
    assert_eq!(DescriptionGenerator::link(&link), "Navigate to 'View cart'");
}

#[test]
fn test_input_description_uses_placeholder() {
    let input: ElementRef = FakeElement::new("input")
        .with_attr("placeholder", "Your email")
        .with_attr("name", "email");
    assert_eq!(
        DescriptionGenerator::input(&input),
        "Set the value of the 'Your email' field"
    );
}
