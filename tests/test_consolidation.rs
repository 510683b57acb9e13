use recipe_portal::{
    consolidate, ConsolidatedIngredient, Ingredient, Recipe, RecipeError, DEFAULT_MAX_RECIPES,
};

fn recipe(name: &str, ingredients: Vec<Ingredient>) -> Recipe {
    Recipe::new(name, 8, ingredients).unwrap()
}

#[test]
fn test_consolidation_is_order_independent() {
    let r1 = recipe("Pasta", vec![Ingredient::with_amount("tomato", 200.0, "grams")]);
    let r2 = recipe("Salad", vec![Ingredient::with_amount("tomato", 300.0, "grams")]);

    let expected = vec![ConsolidatedIngredient {
        name: "tomato".to_string(),
        unit: Some("grams".to_string()),
        quantity: Some(500.0),
    }];

    assert_eq!(
        consolidate(&[r1.clone(), r2.clone()], DEFAULT_MAX_RECIPES).unwrap(),
        expected
    );
    assert_eq!(consolidate(&[r2, r1], DEFAULT_MAX_RECIPES).unwrap(), expected);
}

#[test]
fn test_absent_quantity_contributes_nothing() {
    let unmeasured = Ingredient {
        name: "salt".to_string(),
        quantity: None,
        unit: Some("grams".to_string()),
    };
    let recipes = vec![
        recipe("Soup", vec![unmeasured]),
        recipe("Bread", vec![Ingredient::with_amount("salt", 5.0, "grams")]),
    ];

    assert_eq!(
        consolidate(&recipes, DEFAULT_MAX_RECIPES).unwrap(),
        vec![ConsolidatedIngredient {
            name: "salt".to_string(),
            unit: Some("grams".to_string()),
            quantity: Some(5.0),
        }]
    );
}

#[test]
fn test_missing_unit_is_its_own_key() {
    let recipes = vec![
        recipe("Soup", vec![Ingredient::new("salt")]),
        recipe("Bread", vec![Ingredient::with_amount("salt", 5.0, "grams")]),
    ];

    let merged = consolidate(&recipes, DEFAULT_MAX_RECIPES).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].unit, None);
    assert_eq!(merged[0].quantity, None);
    assert_eq!(merged[1].quantity, Some(5.0));
}

#[test]
fn test_too_many_recipes_is_rejected() {
    let recipes: Vec<Recipe> = (1..=5)
        .map(|i| recipe(&format!("Dish {}", i), vec![Ingredient::new("salt")]))
        .collect();

    match consolidate(&recipes, 4) {
        Err(RecipeError::TooManyRecipes { count, max }) => {
            assert_eq!(count, 5);
            assert_eq!(max, 4);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    assert_eq!(consolidate(&recipes, 5).unwrap().len(), 1);
}

#[test]
fn test_empty_recipe_list() {
    assert!(consolidate(&[], DEFAULT_MAX_RECIPES).unwrap().is_empty());
}

#[test]
fn test_consolidating_persisted_records() {
    // Bulk-imported records carry string quantities and blank units
    let recipes: Vec<Recipe> = serde_json::from_str(
        r#"[
            {"_id": "a1", "name": "Dal", "ingredients": [
                {"name": "Lentils", "quantity": "250", "unit": "grams"},
                {"name": "Cumin", "quantity": "", "unit": ""}
            ]},
            {"_id": "b2", "name": "Khichdi", "ingredients": [
                {"name": "lentils ", "quantity": 150, "unit": "Grams"},
                {"name": "cumin", "quantity": null}
            ]}
        ]"#,
    )
    .unwrap();

    let merged = consolidate(&recipes, DEFAULT_MAX_RECIPES).unwrap();
    assert_eq!(
        merged,
        vec![
            ConsolidatedIngredient {
                name: "Lentils".to_string(),
                unit: Some("grams".to_string()),
                quantity: Some(400.0),
            },
            ConsolidatedIngredient {
                name: "Cumin".to_string(),
                unit: None,
                quantity: None,
            },
        ]
    );
}

#[test]
fn test_consolidation_is_repeatable() {
    let recipes = vec![
        recipe(
            "Curry",
            vec![
                Ingredient::with_amount("Onion", 1.0, "unit"),
                Ingredient::new("Turmeric"),
            ],
        ),
        recipe("Stew", vec![Ingredient::with_amount("onion", 2.5, "unit")]),
    ];

    let first = consolidate(&recipes, DEFAULT_MAX_RECIPES).unwrap();
    let second = consolidate(&recipes, DEFAULT_MAX_RECIPES).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].quantity, Some(3.5));
}
