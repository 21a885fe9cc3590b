//! Test fixture generators for integration tests.
#![allow(dead_code)]

use init_lowering::domain::class::{
    ClassDescriptor, ClassKind, Instruction, MethodBody, MethodKind,
};

pub fn class(id: &str, superclass: Option<&str>, interfaces: &[&str]) -> ClassDescriptor {
    ClassDescriptor {
        id: id.into(),
        kind: ClassKind::Class,
        superclass: superclass.map(String::from),
        interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
        methods: vec![],
    }
}

pub fn interface(id: &str, extends: &[&str]) -> ClassDescriptor {
    ClassDescriptor {
        id: id.into(),
        kind: ClassKind::Interface,
        superclass: None,
        interfaces: extends.iter().map(|s| s.to_string()).collect(),
        methods: vec![],
    }
}

pub fn with_clinit(mut desc: ClassDescriptor, instructions: Vec<Instruction>) -> ClassDescriptor {
    desc.methods.push(MethodBody::linear(
        "<clinit>",
        MethodKind::ClassInit,
        instructions,
    ));
    desc
}

pub fn with_method(
    mut desc: ClassDescriptor,
    name: &str,
    kind: MethodKind,
    instructions: Vec<Instruction>,
) -> ClassDescriptor {
    desc.methods
        .push(MethodBody::linear(name, kind, instructions));
    desc
}

pub fn invoke_static(class: &str) -> Instruction {
    Instruction::InvokeStatic {
        class: class.into(),
    }
}

pub fn get_static(class: &str) -> Instruction {
    Instruction::GetStatic {
        class: class.into(),
        constant: false,
    }
}

pub fn new_instance(class: &str) -> Instruction {
    Instruction::New {
        class: class.into(),
    }
}

/// The load-order scenario program: `svc.LoadOrderServiceImpl` implements
/// `svc.Service`; its static block uses the nested class `svc.Log` and then
/// calls `Log.create()`; its constructor calls `Log.run()`.
pub fn load_order_program() -> Vec<ClassDescriptor> {
    let service = interface("svc.Service", &[]);
    let log = with_clinit(class("svc.Log", None, &[]), vec![]);
    let mut impl_class = class("svc.LoadOrderServiceImpl", None, &["svc.Service"]);
    impl_class = with_clinit(
        impl_class,
        vec![get_static("svc.Log"), invoke_static("svc.Log")],
    );
    impl_class = with_method(
        impl_class,
        "<init>",
        MethodKind::Constructor,
        vec![invoke_static("svc.Log")],
    );
    impl_class = with_method(impl_class, "run", MethodKind::Instance, vec![]);
    vec![service, log, impl_class]
}

/// A small service program: interface `svc.Service`, implementations
/// `svc.ImplA` and `svc.ImplB` (both with static initializers), and an
/// unrelated class `svc.Unrelated` that does not implement the interface.
pub fn service_program() -> Vec<ClassDescriptor> {
    vec![
        interface("svc.Service", &[]),
        with_clinit(class("svc.ImplA", None, &["svc.Service"]), vec![]),
        with_clinit(class("svc.ImplB", None, &["svc.Service"]), vec![]),
        class("svc.Unrelated", None, &[]),
    ]
}
