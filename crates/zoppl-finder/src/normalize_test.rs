use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// product list location
// -----------------------------------------------------------------------

fn names(response: &NormalizedResponse) -> Vec<&str> {
    response
        .products
        .iter()
        .map(|p| p.name.as_deref().unwrap_or("<none>"))
        .collect()
}

#[test]
fn products_read_from_each_known_field() {
    for field in ["items", "response", "products", "results"] {
        let payload = json!({ field: [{"name": "Skirt"}] });
        let normalized = normalize_response(&payload);
        assert_eq!(names(&normalized), vec!["Skirt"], "field {field}");
    }
}

#[test]
fn products_read_from_bare_array() {
    let payload = json!([{"name": "A"}, {"name": "B"}]);
    let normalized = normalize_response(&payload);
    assert_eq!(names(&normalized), vec!["A", "B"]);
    assert!(normalized.analysis.is_none());
}

#[test]
fn first_matching_product_field_wins() {
    let payload = json!({
        "results": [{"name": "from results"}],
        "products": [{"name": "from products"}],
        "response": [{"name": "from response"}],
        "items": [{"name": "from items"}],
    });
    assert_eq!(names(&normalize_response(&payload)), vec!["from items"]);

    let payload = json!({
        "results": [{"name": "from results"}],
        "products": [{"name": "from products"}],
    });
    assert_eq!(names(&normalize_response(&payload)), vec!["from products"]);
}

#[test]
fn non_array_product_fields_are_skipped() {
    let payload = json!({
        "items": {"name": "not a list"},
        "response": "still not a list",
        "results": [{"name": "the list"}],
    });
    assert_eq!(names(&normalize_response(&payload)), vec!["the list"]);
}

#[test]
fn missing_product_list_is_empty() {
    let payload = json!({"status": true, "message": "ok"});
    assert!(normalize_response(&payload).products.is_empty());
    assert!(normalize_response(&json!(null)).products.is_empty());
    assert!(normalize_response(&json!("text")).products.is_empty());
}

// -----------------------------------------------------------------------
// product fields
// -----------------------------------------------------------------------

#[test]
fn product_fields_are_mapped() {
    let payload = json!({"items": [{
        "name": "Voluminous Black Skirt",
        "price": "€39.95",
        "image_url": "//static.zara.net/a.jpg",
        "product_url": "https://www.zara.com/p1",
        "retailer": "Zara",
        "availability": "Available",
        "attributes": {
            "color": "Black",
            "length": "midi",
            "material": "100% cotton",
            "style": "pleated",
            "clothing_type": "Skirt"
        }
    }]});

    let product = &normalize_response(&payload).products[0];
    assert_eq!(product.name.as_deref(), Some("Voluminous Black Skirt"));
    assert_eq!(product.price.as_deref(), Some("€39.95"));
    assert_eq!(product.image_url.as_deref(), Some("//static.zara.net/a.jpg"));
    assert_eq!(product.product_url.as_deref(), Some("https://www.zara.com/p1"));
    assert_eq!(product.retailer, Some(Retailer::Zara));
    assert_eq!(product.availability.as_deref(), Some("Available"));
    assert_eq!(product.attributes.color.as_deref(), Some("Black"));
    assert_eq!(product.attributes.length.as_deref(), Some("midi"));
    assert_eq!(product.attributes.material.as_deref(), Some("100% cotton"));
    assert_eq!(product.attributes.style.as_deref(), Some("pleated"));
    assert_eq!(product.attributes.clothing_type.as_deref(), Some("Skirt"));
}

#[test]
fn retailer_falls_back_to_brand() {
    let payload = json!({"items": [{"brand": "H&M"}, {"retailer": "hm", "brand": "Zara"}]});
    let products = normalize_response(&payload).products;
    assert_eq!(products[0].retailer, Some(Retailer::HAndM));
    assert_eq!(products[1].retailer, Some(Retailer::HAndM));
}

#[test]
fn blank_and_null_fields_are_absent() {
    let payload = json!({"items": [{
        "name": "",
        "price": null,
        "image_url": "   ",
        "retailer": "",
        "attributes": {"color": "", "style": null}
    }]});
    let product = &normalize_response(&payload).products[0];
    assert_eq!(product, &Product::default());
}

#[test]
fn numeric_price_is_carried_as_text() {
    let payload = json!({"items": [{"price": 29.99}]});
    let product = &normalize_response(&payload).products[0];
    assert_eq!(product.price.as_deref(), Some("29.99"));
}

#[test]
fn non_object_entries_keep_their_position() {
    let payload = json!({"items": ["junk", {"name": "Real"}, 42]});
    let products = normalize_response(&payload).products;
    assert_eq!(products.len(), 3);
    assert_eq!(products[0], Product::default());
    assert_eq!(products[1].name.as_deref(), Some("Real"));
}

// -----------------------------------------------------------------------
// analysis location
// -----------------------------------------------------------------------

#[test]
fn analysis_from_clothing_attributes_field() {
    let payload = json!({
        "clothing_attributes": {
            "clothing_type": "skirt",
            "attributes": {"color": "black", "length": "midi"}
        },
        "clothing_type": "ignored",
        "items": []
    });
    let analysis = normalize_response(&payload).analysis.unwrap();
    assert_eq!(analysis.clothing_type.as_deref(), Some("skirt"));
    assert_eq!(analysis.attributes.get("color").map(String::as_str), Some("black"));
    assert_eq!(analysis.attributes.len(), 2);
}

#[test]
fn analysis_from_top_level_when_attributes_present() {
    let payload = json!({
        "clothing_type": "dress",
        "attributes": {"color": "red", "fit": "slim"},
        "items": []
    });
    let analysis = normalize_response(&payload).analysis.unwrap();
    assert_eq!(analysis.clothing_type.as_deref(), Some("dress"));
    assert_eq!(analysis.attributes.get("fit").map(String::as_str), Some("slim"));
}

#[test]
fn analysis_reads_clothing_type_from_attributes_when_not_top_level() {
    let payload = json!({
        "attributes": {"clothing_type": "skirt", "color": "black"},
        "items": []
    });
    let analysis = normalize_response(&payload).analysis.unwrap();
    assert_eq!(analysis.clothing_type.as_deref(), Some("skirt"));
    let shown: Vec<_> = analysis.display_attributes().collect();
    assert_eq!(shown, vec![("color", "black")]);
}

#[test]
fn analysis_from_clothing_type_alone() {
    let payload = json!({"clothing_type": "shirt", "items": []});
    let analysis = normalize_response(&payload).analysis.unwrap();
    assert_eq!(analysis.clothing_type.as_deref(), Some("shirt"));
    assert!(analysis.attributes.is_empty());
}

#[test]
fn analysis_absent_without_any_source() {
    let payload = json!({"status": true, "items": [{"name": "x"}]});
    assert!(normalize_response(&payload).analysis.is_none());
}

#[test]
fn falsy_analysis_fields_do_not_count_as_present() {
    let payload = json!({
        "clothing_attributes": null,
        "attributes": {},
        "clothing_type": ""
    });
    // `attributes: {}` is truthy, so the payload itself is the source.
    let analysis = normalize_response(&payload).analysis.unwrap();
    assert!(analysis.clothing_type.is_none());
    assert!(analysis.is_empty());

    let payload = json!({"clothing_attributes": false, "clothing_type": ""});
    assert!(normalize_response(&payload).analysis.is_none());
}

#[test]
fn analysis_source_without_known_fields_is_empty() {
    let payload = json!({"clothing_attributes": {"unexpected": true}});
    let analysis = normalize_response(&payload).analysis.unwrap();
    assert_eq!(analysis, AnalysisResult::default());
}

#[test]
fn analysis_attribute_values_skip_non_text() {
    let payload = json!({
        "clothing_type": "skirt",
        "attributes": {"color": "black", "tags": ["a"], "pattern": "", "size": 38}
    });
    let analysis = normalize_response(&payload).analysis.unwrap();
    let keys: Vec<_> = analysis.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["color", "size"]);
}

// -----------------------------------------------------------------------
// service failures and idempotence
// -----------------------------------------------------------------------

#[test]
fn service_failure_uses_message() {
    let payload = json!({"status": false, "message": "no match"});
    assert_eq!(service_failure(&payload).as_deref(), Some("no match"));
}

#[test]
fn service_failure_defaults_message() {
    let payload = json!({"status": false});
    assert_eq!(
        service_failure(&payload).as_deref(),
        Some("Failed to process image")
    );
}

#[test]
fn service_failure_requires_literal_false() {
    assert!(service_failure(&json!({"status": true})).is_none());
    assert!(service_failure(&json!({"status": "false"})).is_none());
    assert!(service_failure(&json!({"status": 0})).is_none());
    assert!(service_failure(&json!([])).is_none());
}

#[test]
fn interpret_response_stops_on_service_failure() {
    let payload = json!({"status": false, "message": "no match", "items": [{"name": "x"}]});
    let err = interpret_response(&payload).unwrap_err();
    assert!(
        matches!(err, FinderError::ServiceFailure { ref message } if message == "no match"),
        "expected ServiceFailure, got: {err:?}"
    );
}

#[test]
fn interpret_response_carries_search_term() {
    let payload = json!({"status": true, "search_term": "black pleated skirt", "items": []});
    let normalized = interpret_response(&payload).unwrap();
    assert_eq!(normalized.search_term.as_deref(), Some("black pleated skirt"));
}

#[test]
fn normalizing_twice_is_identical() {
    let payload = json!({
        "clothing_type": "skirt",
        "attributes": {"color": "black"},
        "items": [
            {"name": "A", "image_url": "//cdn/a.jpg", "retailer": "Zara"},
            {"name": "B", "image_url": "https://cdn/b.m3u8", "brand": "H&M"}
        ]
    });
    assert_eq!(normalize_response(&payload), normalize_response(&payload));
}
