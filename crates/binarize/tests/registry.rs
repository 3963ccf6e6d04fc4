use binarize::{
    BinarizeConfig, BinarizeError, ColumnMethod, FlagSetProblem, FlagSetRegistry, MAX_FLAGS,
    MemoryRecord, MemorySchema, MethodTarget, RawValue, Representation,
};

fn schema() -> MemorySchema {
    MemorySchema::new()
        .with_column("colors", Representation::Numeric)
        .with_column("roles", Representation::Textual)
        .with_column("c", Representation::Numeric)
        .with_column("b_c", Representation::Numeric)
}

#[test]
fn bits_follow_flag_order() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder.configure("colors", ["red", "green", "blue"], None).unwrap();
    let registry = builder.build();

    let config = registry.config("colors").unwrap();
    assert_eq!(config.bit_of("red"), Some(1));
    assert_eq!(config.bit_of("green"), Some(2));
    assert_eq!(config.bit_of("blue"), Some(4));
    assert_eq!(config.index_of("blue"), Some(2));
    assert_eq!(config.bit_of("purple"), None);
    assert_eq!(config.mask(), 0b111);
    assert_eq!(config.representation(), Representation::Numeric);
}

#[test]
fn representation_defaults_to_schema() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder
        .configure("roles", ["admin", "editor"], None)
        .unwrap()
        .configure("colors", ["red", "green"], Some(Representation::Textual))
        .unwrap();
    let registry = builder.build();

    assert_eq!(registry.config("roles").unwrap().representation(), Representation::Textual);
    assert_eq!(registry.config("colors").unwrap().representation(), Representation::Textual);
    let columns: Vec<&str> = registry.columns().map(|c| c.column()).collect();
    assert_eq!(columns, ["roles", "colors"]);
}

#[test]
fn unknown_column_is_rejected() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    let err = builder.configure("missing", ["a", "b"], None).unwrap_err();
    assert!(matches!(err, BinarizeError::UnknownColumn(c) if c == "missing"));
    assert!(builder.build().is_empty());
}

#[test]
fn duplicate_configuration_keeps_first_mapping() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder.configure("colors", ["red", "green", "blue"], None).unwrap();
    let err = builder.configure("colors", ["blue", "red"], None).unwrap_err();
    assert!(matches!(err, BinarizeError::DuplicateConfiguration(c) if c == "colors"));

    let registry = builder.build();
    let config = registry.config("colors").unwrap();
    assert_eq!(config.len(), 3);
    assert_eq!(config.bit_of("red"), Some(1));
    assert_eq!(config.bit_of("blue"), Some(4));
}

#[test]
fn single_flag_registers_nothing() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    let err = builder.configure("colors", ["x"], None).unwrap_err();
    assert!(matches!(
        err,
        BinarizeError::InvalidFlagSet { problem: FlagSetProblem::TooFew(1), .. }
    ));

    let registry = builder.build();
    assert!(registry.get("colors").is_none());
    assert!(registry.methods().is_empty());
    assert!(!registry.methods().contains("mark_x_colors"));
}

#[test]
fn empty_and_duplicate_flags_are_rejected() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);

    let err = builder.configure("colors", Vec::<&str>::new(), None).unwrap_err();
    assert!(matches!(
        err,
        BinarizeError::InvalidFlagSet { problem: FlagSetProblem::TooFew(0), .. }
    ));

    let err = builder.configure("colors", ["red", "red"], None).unwrap_err();
    assert!(matches!(
        err,
        BinarizeError::InvalidFlagSet { problem: FlagSetProblem::Duplicate(f), .. } if f == "red"
    ));

    // The rejected attempts must not block a valid configuration.
    builder.configure("colors", ["red", "green"], None).unwrap();
}

#[test]
fn non_identifier_flags_get_no_method_names() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder.configure("colors", ["red", "light-blue"], None).unwrap();
    let registry = builder.build();

    assert_eq!(registry.config("colors").unwrap().bit_of("light-blue"), Some(2));
    assert!(registry.methods().contains("mark_red_colors"));
    assert!(!registry.methods().contains("mark_light-blue_colors"));
    assert_eq!(registry.methods().len(), 5 + 6);

    let mut record = MemoryRecord::new();
    let mut flags = registry.bind(&mut record);
    assert_eq!(flags.mark("colors", "light-blue").unwrap(), RawValue::Int(2));
    assert!(flags.is_set("colors", "light-blue").unwrap());
}

#[test]
fn taken_method_names_keep_their_first_owner() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder.configure("b_c", ["a", "x"], None).unwrap();
    // `a_b_c?` is taken by `b_c`, `all_c?` by the column query of `c`.
    builder.configure("c", ["a_b", "all"], None).unwrap();
    let registry = builder.build();

    assert_eq!(registry.len(), 2);
    let methods = registry.methods();
    assert_eq!(methods.get("a_b_c?").unwrap().column, "b_c");
    assert_eq!(methods.get("all_c?").unwrap().target, MethodTarget::Column(ColumnMethod::All));
    assert_eq!(methods.get("mark_a_b_c").unwrap().column, "c");
    assert_eq!(methods.get("mark_all_c").unwrap().column, "c");
    assert_eq!(methods.len(), (5 + 2 * 6) + (5 + 2 * 6 - 2));

    let mut record = MemoryRecord::new();
    let mut flags = registry.bind(&mut record);
    flags.mark("c", "all").unwrap();
    flags.mark("c", "a_b").unwrap();
    assert!(flags.all("c").unwrap());
}

#[test]
fn imports_json_configuration() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder
        .import_from_json(
            br#"{
                "columns": [
                    { "column": "colors", "flags": ["red", "green", "blue"], "as": "integer" },
                    { "column": "roles", "flags": ["admin", "editor"] }
                ]
            }"#,
        )
        .unwrap();
    let registry = builder.build();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.config("roles").unwrap().representation(), Representation::Textual);
    assert_eq!(
        registry.to_config(),
        BinarizeConfig::new()
            .with_column("colors", ["red", "green", "blue"], Some(Representation::Numeric))
            .with_column("roles", ["admin", "editor"], Some(Representation::Textual))
    );
}

#[test]
fn exported_configuration_reimports() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    builder.configure("colors", ["red", "green"], None).unwrap();
    builder.configure("roles", ["admin", "editor"], None).unwrap();
    let json = builder.build().to_config().to_json().unwrap();

    let mut builder = FlagSetRegistry::builder(&schema);
    builder.import_from_json(json.as_bytes()).unwrap();
    let registry = builder.build();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.config("roles").unwrap().representation(), Representation::Textual);
    assert_eq!(BinarizeConfig::from_json(json.as_bytes()).unwrap(), registry.to_config());
}

#[test]
fn malformed_json_configuration() {
    let schema = schema();
    let mut builder = FlagSetRegistry::builder(&schema);
    let err = builder.import_from_json(br#"{ "columns": [{ "flags": 1 }] }"#).unwrap_err();
    assert!(matches!(err, BinarizeError::Config(_)));
}

#[test]
fn unconfigured_column() {
    let registry = FlagSetRegistry::default();
    let err = registry.codec("colors").unwrap_err();
    assert!(matches!(err, BinarizeError::UnconfiguredColumn(c) if c == "colors"));
}
