//! Scenario tests for the type graph builder
//!
//! Each test compiles a small schema set in memory, builds the graph with
//! the PascalCase naming policy and a catch-all namespace mapping, and checks
//! the resulting nodes and edges.

mod common;

use common::*;
use pretty_assertions::assert_eq;

use xsd_typegraph::model::{PropertyType, RestrictionModel, TypeKind};
use xsd_typegraph::schema::{
    AttributeDecl, AttributeGroupDef, AttributeItem, AttributeUse, ComplexTypeDef,
    DerivationMethod, ElementDecl, Facet, GroupDef, ModelGroup, Occurs, Particle, PrimitiveType,
    SimpleTypeDef, TypeRef, Wildcard,
};
use xsd_typegraph::{BuildOptions, QName};

#[test]
fn test_extension_appends_to_base() {
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(sequence_type("Base", vec![xs_element("x", "int")]))
        .with_complex_type(
            ComplexTypeDef::named(q("Derived"))
                .derived(q("Base"), DerivationMethod::Extension)
                .with_particle(Particle::group(ModelGroup::sequence(vec![xs_element("y", "int")]))),
        )]);

    let base = node(&graph, "Base");
    let derived = node(&graph, "Derived");
    assert_eq!(property_names(base), vec!["X"]);
    assert_eq!(property_names(derived), vec!["Y"]);
    assert_eq!(derived.as_class().unwrap().base_class, Some(base.id));
    assert_eq!(base.as_class().unwrap().derived_types, vec![derived.id]);
    assert_eq!(graph.flattened_properties(derived.id).len(), 2);
}

#[test]
fn test_restriction_does_not_duplicate_base_content() {
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(sequence_type(
            "Base",
            vec![xs_element("x", "int"), xs_element("y", "string").with_occurs(Occurs::optional())],
        ))
        .with_complex_type(
            ComplexTypeDef::named(q("Restricted"))
                .derived(q("Base"), DerivationMethod::Restriction)
                .with_particle(Particle::group(ModelGroup::sequence(vec![xs_element("x", "int")]))),
        )
        .with_complex_type(
            ComplexTypeDef::named(q("Extended"))
                .derived(q("Base"), DerivationMethod::Extension)
                .with_particle(Particle::group(ModelGroup::sequence(vec![xs_element("z", "int")]))),
        )]);

    let base = node(&graph, "Base");
    let restricted = node(&graph, "Restricted");
    let extended = node(&graph, "Extended");
    assert!(restricted.properties().is_empty());
    assert_eq!(graph.flattened_properties(restricted.id).len(), base.properties().len());
    assert_eq!(graph.flattened_properties(extended.id).len(), base.properties().len() + 1);
    assert_eq!(
        base.as_class().unwrap().derived_types,
        vec![restricted.id, extended.id]
    );
}

#[test]
fn test_shared_root_type_is_split() {
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(sequence_type("T", vec![xs_element("v", "string")]))
        .with_complex_type(sequence_type("U", vec![]))
        .with_element(root("a", "T"))
        .with_element(root("b", "T"))
        .with_element(root("c", "U"))
        .with_element(root("d", "T"))]);

    assert_eq!(type_names(&graph), vec!["T", "U", "A", "B", "D"]);

    let t = node(&graph, "T");
    assert!(t.is_abstract_root);
    assert_eq!(t.root_element_name, None);
    assert!(t.as_class().unwrap().is_abstract);

    for (name, element) in [("A", "a"), ("B", "b"), ("D", "d")] {
        let rooted = node(&graph, name);
        assert_eq!(rooted.root_element_name, Some(q(element)));
        assert_eq!(rooted.as_class().unwrap().base_class, Some(t.id));
        assert!(rooted.properties().is_empty());
        assert!(!rooted.is_anonymous);
    }
    assert_eq!(t.as_class().unwrap().derived_types.len(), 3);

    let u = node(&graph, "U");
    assert_eq!(u.root_element_name, Some(q("c")));
    assert!(!u.is_abstract_root);
}

#[test]
fn test_inline_root_type_is_shared_with_references() {
    let order = ElementDecl::new(
        q("order"),
        TypeRef::complex(
            ComplexTypeDef::anonymous()
                .with_particle(Particle::group(ModelGroup::sequence(vec![xs_element("id", "string")]))),
        ),
    );
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(sequence_type("Cart", vec![many(Particle::element_ref(q("order")))]))
        .with_element(order)]);

    assert_eq!(type_names(&graph), vec!["Cart", "Order"]);
    let order = node(&graph, "Order");
    assert!(order.is_anonymous);
    assert_eq!(order.root_element_name, Some(q("order")));
    assert_eq!(property_names(order), vec!["Id"]);

    let cart = node(&graph, "Cart");
    let reference = property(cart, "Order");
    assert_eq!(reference.property_type, PropertyType::Model(order.id));
    assert!(reference.is_collection);
    assert!(!reference.is_nullable);
}

#[test]
fn test_identity_across_documents() {
    let common = doc("common.xsd").with_complex_type(sequence_type(
        "Address",
        vec![xs_element("street", "string")],
    ));
    let people = doc("people.xsd")
        .including("common.xsd")
        .with_complex_type(sequence_type("Person", vec![typed_element("home", "Address")]));
    let companies = doc("companies.xsd")
        .importing("common.xsd")
        .with_complex_type(sequence_type("Company", vec![typed_element("office", "Address")]));
    let graph = build(vec![people, companies, common]);

    let addresses: Vec<_> = graph
        .types()
        .filter(|t| t.schema_identity == q("Address"))
        .collect();
    assert_eq!(addresses.len(), 1);
    let address = addresses[0].id;

    assert_eq!(
        property(node(&graph, "Person"), "Home").property_type,
        PropertyType::Model(address)
    );
    assert_eq!(
        property(node(&graph, "Company"), "Office").property_type,
        PropertyType::Model(address)
    );
    // common.xsd is built first
    assert_eq!(type_names(&graph), vec!["Address", "Person", "Company"]);
}

#[test]
fn test_first_declaration_wins() {
    let first = doc("first.xsd").with_complex_type(sequence_type("Item", vec![xs_element("a", "string")]));
    let second = doc("second.xsd").with_complex_type(sequence_type("Item", vec![xs_element("b", "string")]));
    let graph = build(vec![first, second]);

    assert_eq!(type_names(&graph), vec!["Item"]);
    assert_eq!(property_names(node(&graph, "Item")), vec!["A"]);
}

#[test]
fn test_cyclic_includes_terminate() {
    let a = doc("a.xsd")
        .including("b.xsd")
        .with_complex_type(sequence_type("A", vec![typed_element("b", "B")]));
    let b = doc("b.xsd").including("a.xsd").with_complex_type(sequence_type(
        "B",
        vec![typed_element("a", "A").with_occurs(Occurs::optional())],
    ));
    let graph = build(vec![a, b]);

    let a = node(&graph, "A");
    let b = node(&graph, "B");
    assert_eq!(property(a, "B").property_type, PropertyType::Model(b.id));
    assert_eq!(property(b, "A").property_type, PropertyType::Model(a.id));
    assert!(property(b, "A").is_nullable);
}

#[test]
fn test_self_referential_type() {
    let graph = build(vec![doc("tree.xsd").with_complex_type(sequence_type(
        "Node",
        vec![xs_element("value", "string"), many(typed_element("child", "Node"))],
    ))]);

    assert_eq!(graph.len(), 1);
    let tree = node(&graph, "Node");
    let child = property(tree, "Child");
    assert_eq!(child.property_type, PropertyType::Model(tree.id));
    assert!(child.is_collection);
}

fn common_group() -> GroupDef {
    GroupDef {
        name: q("common"),
        group: ModelGroup::sequence(vec![xs_element("id", "string"), xs_element("note", "string")]),
        documentation: Vec::new(),
    }
}

#[test]
fn test_group_reference_yields_shared_interface() {
    let document = doc("shop.xsd")
        .with_group(common_group())
        .with_complex_type(sequence_type(
            "Order",
            vec![Particle::group_ref(q("common")), xs_element("total", "decimal")],
        ))
        .with_complex_type(sequence_type("Invoice", vec![Particle::group_ref(q("common"))]));
    let graph = build(vec![document]);

    assert_eq!(type_names(&graph), vec!["Order", "ICommon", "Invoice"]);
    let common = node(&graph, "ICommon");
    let order = node(&graph, "Order");
    let invoice = node(&graph, "Invoice");
    assert!(matches!(common.kind, TypeKind::Interface(_)));
    assert_eq!(property_names(common), vec!["Id", "Note"]);
    assert_eq!(property_names(order), vec!["Id", "Note", "Total"]);
    assert_eq!(order.interfaces(), &[common.id]);
    assert_eq!(
        common.as_interface().unwrap().derived_types,
        vec![order.id, invoice.id]
    );
}

#[test]
fn test_group_reference_without_interfaces() {
    let document = doc("shop.xsd")
        .with_group(common_group())
        .with_complex_type(sequence_type("Order", vec![Particle::group_ref(q("common"))]));
    let options = BuildOptions {
        generate_interfaces: false,
        ..Default::default()
    };
    let graph = build_with(vec![document], options);

    assert_eq!(type_names(&graph), vec!["Order"]);
    assert_eq!(property_names(node(&graph, "Order")), vec!["Id", "Note"]);
    assert!(node(&graph, "Order").interfaces().is_empty());
}

#[test]
fn test_nested_groups_extend_interfaces() {
    let inner = GroupDef {
        name: q("inner"),
        group: ModelGroup::sequence(vec![xs_element("a", "string")]),
        documentation: Vec::new(),
    };
    let outer = GroupDef {
        name: q("outer"),
        group: ModelGroup::sequence(vec![Particle::group_ref(q("inner")), xs_element("b", "string")]),
        documentation: Vec::new(),
    };
    let graph = build(vec![doc("shop.xsd")
        .with_group(inner)
        .with_group(outer)
        .with_complex_type(sequence_type("T", vec![Particle::group_ref(q("outer"))]))]);

    let inner = node(&graph, "IInner");
    let outer = node(&graph, "IOuter");
    let t = node(&graph, "T");
    assert_eq!(outer.interfaces(), &[inner.id]);
    assert_eq!(property_names(inner), vec!["A"]);
    // "A" is declared by the extended interface
    assert_eq!(property_names(outer), vec!["B"]);
    assert_eq!(property_names(t), vec!["A", "B"]);
    assert_eq!(t.interfaces(), &[outer.id, inner.id]);
}

#[test]
fn test_recursive_group_terminates() {
    let group = GroupDef {
        name: q("g"),
        group: ModelGroup::sequence(vec![
            xs_element("x", "string"),
            Particle::group_ref(q("g")).with_occurs(Occurs::optional()),
        ]),
        documentation: Vec::new(),
    };
    let graph = build(vec![doc("shop.xsd")
        .with_group(group)
        .with_complex_type(sequence_type("T", vec![Particle::group_ref(q("g"))]))]);

    let g = node(&graph, "IG");
    assert_eq!(property_names(g), vec!["X"]);
    assert!(g.interfaces().is_empty());
    assert_eq!(property_names(node(&graph, "T")), vec!["X"]);
}

#[test]
fn test_attribute_group_interface() {
    let audit = AttributeGroupDef {
        name: q("audit"),
        attributes: vec![
            AttributeItem::Attribute(AttributeDecl::new(QName::local("created"), TypeRef::xsd("dateTime"))),
            AttributeItem::Attribute(
                AttributeDecl::new(QName::local("by"), TypeRef::xsd("string")).with_use(AttributeUse::Required),
            ),
        ],
        ..Default::default()
    };
    let graph = build(vec![doc("shop.xsd")
        .with_attribute_group(audit)
        .with_complex_type(
            ComplexTypeDef::named(q("Order")).with_attribute(AttributeItem::Group(q("audit"))),
        )]);

    let audit = node(&graph, "IAudit");
    let order = node(&graph, "Order");
    assert_eq!(property_names(audit), vec!["Created", "By"]);
    assert_eq!(property_names(order), vec!["Created", "By"]);
    assert_eq!(order.interfaces(), &[audit.id]);

    let created = property(order, "Created");
    assert!(created.is_attribute);
    assert!(created.is_nullable);
    assert_eq!(created.property_type, PropertyType::Primitive(PrimitiveType::DateTime));
    let by = property(order, "By");
    assert!(by.is_required);
    assert!(!by.is_nullable);
}

#[test]
fn test_attribute_wildcard_declared_once_per_chain() {
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(ComplexTypeDef::named(q("Base")).with_any_attribute(Wildcard::default()))
        .with_complex_type(
            ComplexTypeDef::named(q("Derived"))
                .derived(q("Base"), DerivationMethod::Extension)
                .with_any_attribute(Wildcard::default()),
        )]);

    let base = node(&graph, "Base");
    assert_eq!(property_names(base), vec!["AnyAttribute"]);
    assert!(property(base, "AnyAttribute").is_wildcard);
    assert!(node(&graph, "Derived").properties().is_empty());
}

#[test]
fn test_choice_members_are_optional_and_duplicates_dropped() {
    let graph = build(vec![doc("shop.xsd").with_complex_type(
        ComplexTypeDef::named(q("Payment")).with_particle(Particle::group(ModelGroup::choice(vec![
            xs_element("card", "string"),
            xs_element("card", "int"),
            xs_element("voucher", "string").with_occurs(Occurs::one_or_more()),
            Particle::any(),
        ]))),
    )]);

    let payment = node(&graph, "Payment");
    assert_eq!(property_names(payment), vec!["Card", "Voucher", "Any"]);

    let card = property(payment, "Card");
    assert_eq!(card.property_type, PropertyType::Primitive(PrimitiveType::String));
    assert!(card.is_nullable);
    assert!(!card.is_required);

    let voucher = property(payment, "Voucher");
    assert!(voucher.is_collection);
    assert!(!voucher.is_nullable);
    assert!(property(payment, "Any").is_wildcard);
}

#[test]
fn test_mixed_and_simple_content() {
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(
            ComplexTypeDef::named(q("Note"))
                .with_mixed(true)
                .with_particle(Particle::group(ModelGroup::sequence(vec![xs_element("b", "string")]))),
        )
        .with_complex_type(
            ComplexTypeDef::named(q("Price"))
                .derived(QName::xsd("decimal"), DerivationMethod::Extension)
                .with_simple_content(TypeRef::xsd("decimal"))
                .with_attribute(AttributeItem::Attribute(AttributeDecl::new(
                    QName::local("currency"),
                    TypeRef::xsd("string"),
                ))),
        )]);

    let note = node(&graph, "Note").as_class().unwrap();
    assert!(note.is_mixed_content);
    assert_eq!(note.text_value_type, Some(PropertyType::Primitive(PrimitiveType::String)));

    let price = node(&graph, "Price");
    assert_eq!(
        price.as_class().unwrap().text_value_type,
        Some(PropertyType::Primitive(PrimitiveType::Decimal))
    );
    assert_eq!(property_names(price), vec!["Currency"]);
    assert_eq!(price.as_class().unwrap().base_class, None);
}

#[test]
fn test_enum_detection_and_dedup() {
    let status = SimpleTypeDef::restriction(
        Some(q("status")),
        TypeRef::xsd("string"),
        vec![Facet::enumeration("Foo"), Facet::enumeration("Foo"), Facet::enumeration("foo")],
    );
    let level = SimpleTypeDef::union(Some(q("level")), vec![TypeRef::named(q("status")), TypeRef::xsd("int")]);
    let graph = build(vec![doc("shop.xsd").with_simple_type(status).with_simple_type(level)]);

    let status = node(&graph, "Status").as_enum().unwrap();
    let names: Vec<_> = status.values.iter().map(|v| v.name.as_str()).collect();
    let values: Vec<_> = status.values.iter().map(|v| v.value.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Foo1"]);
    assert_eq!(values, vec!["Foo", "foo"]);

    let level = node(&graph, "Level").as_simple().unwrap();
    assert_eq!(level.value_type, PrimitiveType::String);
}

#[test]
fn test_inline_simple_types_on_elements() {
    let state = ElementDecl::new(
        q("state"),
        TypeRef::simple(SimpleTypeDef::restriction(
            None,
            TypeRef::xsd("string"),
            vec![Facet::enumeration("open"), Facet::enumeration("closed")],
        )),
    );
    let code = ElementDecl::new(
        q("code"),
        TypeRef::simple(SimpleTypeDef::restriction(
            None,
            TypeRef::xsd("string"),
            vec![Facet::MaxLength { value: 5 }],
        )),
    );
    let graph = build(vec![doc("shop.xsd").with_complex_type(sequence_type(
        "Order",
        vec![Particle::element(state), Particle::element(code)],
    ))]);

    let state = node(&graph, "State");
    assert!(state.is_anonymous);
    assert!(state.as_enum().is_some());

    let order = node(&graph, "Order");
    assert_eq!(property(order, "State").property_type, PropertyType::Model(state.id));
    let code = property(order, "Code");
    assert_eq!(code.property_type, PropertyType::Primitive(PrimitiveType::String));
    assert_eq!(code.restrictions, vec![RestrictionModel::MaxLength(5)]);
}

fn shapes() -> xsd_typegraph::schema::SchemaDocument {
    doc("shapes.xsd")
        .with_complex_type(sequence_type("Shape", vec![]))
        .with_complex_type(
            ComplexTypeDef::named(q("Circle")).derived(q("Shape"), DerivationMethod::Extension),
        )
        .with_complex_type(
            ComplexTypeDef::named(q("Square")).derived(q("Shape"), DerivationMethod::Extension),
        )
        .with_complex_type(sequence_type("Drawing", vec![many(Particle::element_ref(q("shape")))]))
        .with_element(root("shape", "Shape"))
        .with_element(root("circle", "Circle").with_substitution_group(q("shape")))
        .with_element(root("square", "Square").with_substitution_group(q("shape")))
}

#[test]
fn test_substitution_merge() {
    let mut polygon = ElementDecl::untyped(q("polygon")).with_substitution_group(q("shape"));
    polygon.is_abstract = true;
    let document = shapes()
        .with_element(polygon)
        .with_element(ElementDecl::untyped(q("hexagon")).with_substitution_group(q("polygon")));
    let graph = build(vec![document]);

    let drawing = node(&graph, "Drawing");
    assert_eq!(property_names(drawing), vec!["Shape"]);
    let members: Vec<_> = property(drawing, "Shape")
        .substitutes
        .iter()
        .map(|s| s.member.local_name.as_str())
        .collect();
    assert_eq!(members, vec!["circle", "square", "hexagon"]);
}

#[test]
fn test_substitution_separate() {
    let options = BuildOptions {
        substitution_strategy: xsd_typegraph::SubstitutionStrategy::Separate,
        ..Default::default()
    };
    let graph = build_with(vec![shapes()], options);

    let drawing = node(&graph, "Drawing");
    assert_eq!(property_names(drawing), vec!["Shape", "Circle", "Square"]);
    let circle = property(drawing, "Circle");
    assert_eq!(circle.property_type, PropertyType::Model(node(&graph, "Circle").id));
    assert!(circle.is_collection);
    assert!(property(drawing, "Shape").substitutes.is_empty());
}

#[test]
fn test_sequence_order_is_emitted() {
    let options = BuildOptions {
        emit_order: true,
        ..Default::default()
    };
    let graph = build_with(
        vec![doc("shop.xsd").with_complex_type(sequence_type(
            "Line",
            vec![
                xs_element("sku", "string"),
                xs_element("qty", "int"),
                Particle::group(ModelGroup::choice(vec![xs_element("note", "string")])),
            ],
        ))],
        options,
    );

    let line = node(&graph, "Line");
    assert_eq!(property(line, "Sku").order, Some(0));
    assert_eq!(property(line, "Qty").order, Some(1));
    assert_eq!(property(line, "Note").order, None);
}

#[test]
fn test_property_named_like_its_class() {
    let group = GroupDef {
        name: q("named"),
        group: ModelGroup::sequence(vec![xs_element("name", "string")]),
        documentation: Vec::new(),
    };
    let graph = build(vec![doc("shop.xsd")
        .with_group(group)
        .with_complex_type(sequence_type("Name", vec![Particle::group_ref(q("named"))]))
        .with_complex_type(sequence_type("Person", vec![Particle::group_ref(q("named"))]))]);

    // The class renamed its member; the interface and other implementers follow
    assert_eq!(property_names(node(&graph, "Name")), vec!["NameProperty"]);
    assert_eq!(property_names(node(&graph, "INamed")), vec!["NameProperty"]);
    assert_eq!(property_names(node(&graph, "Person")), vec!["NameProperty"]);
}

fn status_element() -> Particle {
    Particle::element(ElementDecl::new(
        q("status"),
        TypeRef::simple(SimpleTypeDef::restriction(
            None,
            TypeRef::xsd("string"),
            vec![Facet::enumeration("open"), Facet::enumeration("closed")],
        )),
    ))
}

#[test]
fn test_inline_enum_in_group_is_one_node() {
    let group = GroupDef {
        name: q("g"),
        group: ModelGroup::sequence(vec![status_element()]),
        documentation: Vec::new(),
    };
    let graph = build(vec![doc("shop.xsd")
        .with_group(group)
        .with_complex_type(sequence_type("A", vec![Particle::group_ref(q("g"))]))
        .with_complex_type(sequence_type("B", vec![Particle::group_ref(q("g"))]))]);

    assert_eq!(type_names(&graph), vec!["A", "IG", "Status", "B"]);
    let status = PropertyType::Model(node(&graph, "Status").id);
    for owner in ["IG", "A", "B"] {
        assert_eq!(property(node(&graph, owner), "Status").property_type, status);
    }
}

#[test]
fn test_inline_complex_type_in_group_is_one_node() {
    let line = ElementDecl::new(
        q("line"),
        TypeRef::complex(
            ComplexTypeDef::anonymous()
                .with_particle(Particle::group(ModelGroup::sequence(vec![xs_element("sku", "string")]))),
        ),
    );
    let group = GroupDef {
        name: q("g"),
        group: ModelGroup::sequence(vec![many(Particle::element(line))]),
        documentation: Vec::new(),
    };
    let options = BuildOptions {
        generate_interfaces: false,
        ..Default::default()
    };
    let graph = build_with(
        vec![doc("shop.xsd")
            .with_group(group)
            .with_complex_type(sequence_type("A", vec![Particle::group_ref(q("g"))]))
            .with_complex_type(sequence_type("B", vec![Particle::group_ref(q("g"))]))],
        options,
    );

    assert_eq!(type_names(&graph), vec!["A", "Line", "B"]);
    let line = node(&graph, "Line");
    assert!(line.is_anonymous);
    assert_eq!(property_names(line), vec!["Sku"]);
    for owner in ["A", "B"] {
        let reference = property(node(&graph, owner), "Line");
        assert_eq!(reference.property_type, PropertyType::Model(line.id));
        assert!(reference.is_collection);
    }
}

#[test]
fn test_inline_enum_in_nested_group_is_pruned_from_outer_interface() {
    let inner = GroupDef {
        name: q("inner"),
        group: ModelGroup::sequence(vec![status_element()]),
        documentation: Vec::new(),
    };
    let outer = GroupDef {
        name: q("outer"),
        group: ModelGroup::sequence(vec![Particle::group_ref(q("inner")), xs_element("b", "string")]),
        documentation: Vec::new(),
    };
    let graph = build(vec![doc("shop.xsd")
        .with_group(inner)
        .with_group(outer)
        .with_complex_type(sequence_type("T", vec![Particle::group_ref(q("outer"))]))]);

    assert_eq!(type_names(&graph), vec!["T", "IOuter", "IInner", "Status"]);
    assert_eq!(property_names(node(&graph, "IOuter")), vec!["B"]);
    let status = PropertyType::Model(node(&graph, "Status").id);
    assert_eq!(property(node(&graph, "IInner"), "Status").property_type, status);
    assert_eq!(property(node(&graph, "T"), "Status").property_type, status);
}

#[test]
fn test_rename_never_duplicates_an_inherited_name() {
    let group = GroupDef {
        name: q("g"),
        group: ModelGroup::sequence(vec![xs_element("c", "string")]),
        documentation: Vec::new(),
    };
    let graph = build(vec![doc("shop.xsd")
        .with_group(group)
        .with_complex_type(sequence_type("C", vec![Particle::group_ref(q("g"))]))
        .with_complex_type(sequence_type("E", vec![xs_element("cProperty", "string")]))
        .with_complex_type(
            ComplexTypeDef::named(q("D"))
                .derived(q("E"), DerivationMethod::Extension)
                .with_particle(Particle::group(ModelGroup::sequence(vec![Particle::group_ref(q("g"))]))),
        )]);

    assert_eq!(property_names(node(&graph, "C")), vec!["CProperty"]);
    assert_eq!(property_names(node(&graph, "IG")), vec!["C"]);
    let d = node(&graph, "D");
    assert_eq!(property_names(d), vec!["C"]);

    let mut flattened: Vec<&str> = graph
        .flattened_properties(d.id)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    flattened.sort_unstable();
    flattened.dedup();
    assert_eq!(flattened.len(), graph.flattened_properties(d.id).len());
}

#[test]
fn test_anonymous_type_avoids_names_of_later_globals() {
    let order = ElementDecl::new(
        q("purchaseOrder"),
        TypeRef::complex(ComplexTypeDef::anonymous()),
    );
    let item = ElementDecl::new(q("item"), TypeRef::complex(ComplexTypeDef::anonymous()));
    let graph = build(vec![doc("shop.xsd")
        .with_complex_type(sequence_type(
            "Cart",
            vec![Particle::element(order), Particle::element(item)],
        ))
        .with_complex_type(sequence_type("purchase-order", vec![]))
        .with_group(GroupDef {
            name: q("item"),
            group: ModelGroup::sequence(vec![xs_element("sku", "string")]),
            documentation: Vec::new(),
        })]);

    // The group would be named IItem, so the inline type keeps Item
    assert_eq!(type_names(&graph), vec!["Cart", "PurchaseOrder1", "Item", "PurchaseOrder"]);
    assert!(node(&graph, "PurchaseOrder1").is_anonymous);
    assert_eq!(node(&graph, "PurchaseOrder").schema_identity, q("purchase-order"));
}
