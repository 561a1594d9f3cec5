use serde_json::json;
use showcase::catalog::{ALL_CATEGORIES, ALL_HEAT};
use showcase::{CatalogQuery, Family, NormalizedProduct, category_options, filter_products, normalize_products};

fn catalog(value: serde_json::Value) -> Vec<NormalizedProduct> {
    normalize_products(&showcase::source::extract_records(value, Family::Product))
}

fn sample() -> Vec<NormalizedProduct> {
    catalog(json!([
        {"name": "Chicken Korma", "heat": "Mild", "category": "Curry", "tags": ["creamy"]},
        {"name": "Vindaloo", "heat": "Hot", "category": "Curry", "tags": ["spicy"]}
    ]))
}

fn wider() -> Vec<NormalizedProduct> {
    catalog(json!([
        {"name": "Chicken Korma", "description": "Creamy coconut sauce", "heat": "Mild", "category": "Curry", "tags": ["creamy"], "diet": "Gluten Free"},
        {"name": "Vindaloo", "heat": "Hot", "category": "Curry", "tags": "spicy"},
        {"name": "Tarka Dal", "heat": "medium", "category": "Sides", "diet": ["Vegan", "Gluten Free"]},
        {"name": "Pilau Rice", "category": "Rice"},
        {"name": "Mystery", "heat": "nuclear"},
        {}
    ]))
}

fn queries() -> Vec<CatalogQuery> {
    let mut all = Vec::new();
    for q in ["", "korma", "gluten", "CREAMY", "zzz", " dal "] {
        for heat in [ALL_HEAT, "Mild", "medium", "HOT"] {
            for cat in [ALL_CATEGORIES, "curry", "Sides", "Rice", "Desserts"] {
                all.push(CatalogQuery::new(q, heat, cat));
            }
        }
    }
    all
}

#[test]
fn korma_query_returns_exactly_the_korma() {
    let products = sample();
    let query = CatalogQuery::new("korma", "All", "All Categories");

    let matched = filter_products(&products, &query);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0], &products[0]);
}

#[test]
fn category_options_from_catalog() {
    let products = catalog(json!([
        {"category": "Curry"},
        {"category": "Curry"},
        {"category": "Rice"},
        {"category": ""}
    ]));

    assert_eq!(category_options(&products), vec!["All Categories", "Curry", "Rice"]);
}

#[test]
fn missing_list_fields_normalize_to_empty_sequences() {
    let products = catalog(json!([{"name": "Plain"}, {"tags": null, "diet": null, "allergens": null}]));
    for product in &products {
        assert!(product.tags.is_empty());
        assert!(product.diet.is_empty());
        assert!(product.allergens.is_empty());
    }
}

#[test]
fn scalar_tags_become_a_single_element() {
    let products = catalog(json!([{"tags": "spicy"}]));
    assert_eq!(products[0].tags, vec!["spicy".to_string()]);
}

#[test]
fn filtering_is_idempotent() {
    let products = wider();
    for query in queries() {
        let once: Vec<NormalizedProduct> = filter_products(&products, &query).into_iter().cloned().collect();
        let twice: Vec<NormalizedProduct> = filter_products(&once, &query).into_iter().cloned().collect();
        assert_eq!(once, twice, "query {query:?} is not idempotent");
    }
}

#[test]
fn narrowing_never_grows_the_result() {
    let products = wider();
    for query in queries() {
        let count = filter_products(&products, &query).len();

        let without_text = CatalogQuery::new("", query.heat.clone(), query.category.clone());
        let without_heat = CatalogQuery::new(query.q.clone(), ALL_HEAT, query.category.clone());
        let without_cat = CatalogQuery::new(query.q.clone(), query.heat.clone(), ALL_CATEGORIES);

        for wider_query in [without_text, without_heat, without_cat, CatalogQuery::default()] {
            assert!(
                count <= filter_products(&products, &wider_query).len(),
                "{query:?} matched more than {wider_query:?}"
            );
        }
    }
}

#[test]
fn results_preserve_catalog_order() {
    let products = wider();
    let matched = filter_products(&products, &CatalogQuery::new("gluten", ALL_HEAT, ALL_CATEGORIES));
    let names: Vec<&str> = matched.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Chicken Korma", "Tarka Dal"]);
}

#[test]
fn query_string_drives_the_filter() {
    let products = wider();
    let query = CatalogQuery::from_query_string("?heat=Medium&cat=sides");
    let matched = filter_products(&products, &query);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Tarka Dal");
}

#[test]
fn unknown_heat_defaults_to_mild() {
    let products = wider();
    let mild = filter_products(&products, &CatalogQuery::new("", "Mild", ALL_CATEGORIES));
    let names: Vec<&str> = mild.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Chicken Korma", "Pilau Rice", "Mystery", ""]);
}
