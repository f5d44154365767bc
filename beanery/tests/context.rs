//! End-to-end tests over the global catalog: derive, scan, wire, look up.

use std::any::type_name;
use std::sync::Arc;

use beanery::stereotype::{COMPONENT, CONFIGURATION, REPOSITORY, SERVICE};
use beanery::{
    ApplicationContext, CapabilityTag, CollisionPolicy, Constructor, ContextError, Injectable,
    TypeDescriptor,
};

fn namespace(module: &str) -> String {
    format!("{}::{module}", module_path!())
}

// === Fixture: a small application ===

mod app {
    use super::*;

    #[derive(Debug, Injectable)]
    pub struct Baz;

    #[derive(Debug, Injectable)]
    #[injectable(tags(COMPONENT))]
    pub struct Foo {
        pub baz: Arc<Baz>,
    }

    #[derive(Injectable)]
    #[injectable(tags(SERVICE))]
    pub struct Bar {
        pub foo: Arc<Foo>,
        pub baz: Arc<Baz>,
    }

    pub mod data {
        use super::*;

        #[derive(Injectable)]
        #[injectable(tags(REPOSITORY))]
        pub struct UserRepository {
            pub baz: Arc<Baz>,
        }
    }
}

#[test]
fn components_and_dependencies_are_registered() {
    let mut context = ApplicationContext::new(namespace("app"));
    let report = context.init().unwrap();

    assert!(report.root_found);
    assert_eq!(report.discovered, 4);
    assert_eq!(report.components.len(), 3);
    assert!(!report.components.contains(&type_name::<app::Baz>()));
    assert_eq!(
        context.bean_names(),
        vec!["bar", "baz", "foo", "userRepository"]
    );
}

#[test]
fn beans_are_singletons() {
    let mut context = ApplicationContext::new(namespace("app"));
    context.init().unwrap();

    let bar: Arc<app::Bar> = context.gen_bean("bar").unwrap();
    let foo: Arc<app::Foo> = context.gen_bean("foo").unwrap();
    let baz: Arc<app::Baz> = context.gen_bean("baz").unwrap();
    let repo: Arc<app::data::UserRepository> = context.gen_bean("userRepository").unwrap();

    assert!(Arc::ptr_eq(&bar.foo, &foo));
    assert!(Arc::ptr_eq(&bar.baz, &baz));
    assert!(Arc::ptr_eq(&foo.baz, &baz));
    assert!(Arc::ptr_eq(&repo.baz, &baz));

    let again: Arc<app::Bar> = context.gen_bean("bar").unwrap();
    assert!(Arc::ptr_eq(&bar, &again));
}

#[test]
fn sub_namespace_builds_only_what_it_needs() {
    let mut context = ApplicationContext::new(namespace("app::data"));
    let report = context.init().unwrap();

    assert_eq!(report.discovered, 1);
    assert_eq!(context.bean_names(), vec!["baz", "userRepository"]);
    assert!(!context.contains_bean("foo"));
}

#[test]
fn unknown_bean_suggests_names() {
    let mut context = ApplicationContext::new(namespace("app"));
    context.init().unwrap();

    match context.gen_bean::<app::Foo>("fooo").unwrap_err() {
        ContextError::BeanNotFound(err) => {
            assert_eq!(err.name, "fooo");
            assert!(err.suggestions.contains(&"foo".to_string()));
        }
        other => panic!("Expected BeanNotFound, got: {other:?}"),
    }
}

#[test]
fn missing_namespace_is_empty() {
    let mut context = ApplicationContext::new(namespace("nowhere"));
    let report = context.init().unwrap();

    assert!(!report.root_found);
    assert!(context.bean_names().is_empty());
}

// === Untagged types are never roots ===

mod loose {
    use super::*;

    #[derive(Injectable)]
    pub struct Helper;
}

#[test]
fn untagged_types_are_not_built_alone() {
    let mut context = ApplicationContext::new(namespace("loose"));
    let report = context.init().unwrap();

    assert_eq!(report.discovered, 1);
    assert!(report.components.is_empty());
    assert!(context.bean_names().is_empty());
}

// === Custom tags: one level of meta-tags only ===

mod scheduling {
    use super::*;

    pub const SCHEDULED: CapabilityTag = CapabilityTag::new("Scheduled", &["Service"]);
    pub const NIGHTLY: CapabilityTag = CapabilityTag::new("Nightly", &["Scheduled"]);

    #[derive(Injectable)]
    #[injectable(tags(SCHEDULED))]
    pub struct Report;

    #[derive(Injectable)]
    #[injectable(tags(NIGHTLY))]
    pub struct Backup;
}

#[test]
fn meta_tags_are_checked_one_level_deep() {
    let mut context = ApplicationContext::new(namespace("scheduling"));
    context.init().unwrap();

    assert!(context.contains_bean("report"));
    assert!(!context.contains_bean("backup"));
}

#[test]
fn custom_markers_widen_eligibility() {
    let mut context = ApplicationContext::builder(namespace("scheduling"))
        .component_markers(["Scheduled"])
        .build();
    context.init().unwrap();

    assert!(context.contains_bean("backup"));
    assert!(!context.contains_bean("report"));
}

// === Cycles ===

// Never constructed, so the fields are never read.
#[allow(dead_code)]
mod cyclic {
    use super::*;

    pub mod solo {
        use super::*;

        #[derive(Injectable)]
        #[injectable(tags(COMPONENT))]
        pub struct Ouroboros {
            pub tail: Arc<Ouroboros>,
        }
    }

    pub mod mutual {
        use super::*;

        #[derive(Injectable)]
        #[injectable(tags(COMPONENT))]
        pub struct Ping {
            pub pong: Arc<Pong>,
        }

        #[derive(Injectable)]
        pub struct Pong {
            pub ping: Arc<Ping>,
        }
    }
}

#[test]
fn self_dependency_is_a_cycle() {
    let mut context = ApplicationContext::new(namespace("cyclic::solo"));

    match context.init().unwrap_err() {
        ContextError::CircularDependency(err) => {
            let ouroboros = type_name::<cyclic::solo::Ouroboros>();
            assert_eq!(err.chain, vec![ouroboros, ouroboros]);
        }
        other => panic!("Expected CircularDependency, got: {other:?}"),
    }
}

#[test]
fn mutual_dependency_is_a_cycle() {
    let mut context = ApplicationContext::new(namespace("cyclic::mutual"));

    match context.init().unwrap_err() {
        ContextError::CircularDependency(err) => {
            let ping = type_name::<cyclic::mutual::Ping>();
            let pong = type_name::<cyclic::mutual::Pong>();
            assert_eq!(err.chain, vec![ping, pong, ping]);
            let message = ContextError::CircularDependency(err).to_string();
            assert!(message.contains("Ping → Pong → Ping"));
        }
        other => panic!("Expected CircularDependency, got: {other:?}"),
    }
    assert!(context.bean_names().is_empty());
}

// === Name collisions ===

mod clash {
    use super::*;

    pub mod audit {
        use super::*;

        #[derive(Injectable)]
        #[injectable(tags(COMPONENT))]
        pub struct Ledger;
    }

    pub mod billing {
        use super::*;

        #[derive(Injectable)]
        #[injectable(tags(COMPONENT))]
        pub struct Ledger;
    }
}

#[test]
fn colliding_names_are_rejected_by_default() {
    let mut context = ApplicationContext::new(namespace("clash"));

    match context.init().unwrap_err() {
        ContextError::NameCollision(err) => {
            assert_eq!(err.name, "ledger");
            assert_eq!(err.existing, type_name::<clash::audit::Ledger>());
            assert_eq!(err.incoming, type_name::<clash::billing::Ledger>());
        }
        other => panic!("Expected NameCollision, got: {other:?}"),
    }
}

#[test]
fn colliding_names_overwrite_when_allowed() {
    let mut context = ApplicationContext::builder(namespace("clash"))
        .collision_policy(CollisionPolicy::Overwrite)
        .build();
    let report = context.init().unwrap();

    assert_eq!(report.components.len(), 2);
    assert_eq!(context.bean_names(), vec!["ledger"]);
    assert!(context.gen_bean::<clash::billing::Ledger>("ledger").is_ok());
    assert!(matches!(
        context.gen_bean::<clash::audit::Ledger>("ledger"),
        Err(ContextError::TypeMismatch { .. })
    ));
}

// === Hand-written descriptors ===

mod manual {
    use super::*;

    pub struct Settings {
        pub url: String,
    }

    impl Injectable for Settings {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::of::<Self>()
                .with_tags(&[CONFIGURATION])
                .with_constructor(Constructor::new(&[], |_| {
                    Ok(Settings {
                        url: "postgres://localhost/shop".to_string(),
                    })
                }))
        }
    }

    beanery::register!(Settings);

    #[derive(Injectable)]
    #[injectable(tags(SERVICE))]
    pub struct Gateway {
        pub settings: Arc<Settings>,
    }
}

#[test]
fn registered_impl_is_scanned_like_a_derived_one() {
    let mut context = ApplicationContext::new(namespace("manual"));
    context.init().unwrap();

    let gateway: Arc<manual::Gateway> = context.gen_bean("gateway").unwrap();
    let settings: Arc<manual::Settings> = context.gen_bean("settings").unwrap();

    assert_eq!(gateway.settings.url, "postgres://localhost/shop");
    assert!(Arc::ptr_eq(&gateway.settings, &settings));
}
