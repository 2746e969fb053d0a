use fetchgen::{Generator, GeneratorConfig, Schema};
use std::fs;

const SDL: &str = r#"
    schema { query: Query mutation: Mutation }

    interface Node { id: ID! }

    enum Gender { MALE FEMALE }

    input EmployeeInput {
        firstName: String!
        gender: Gender!
        departmentId: ID!
    }

    type Department implements Node {
        id: ID!
        name: String!
        employees(first: Int, after: String): EmployeeConnection!
    }

    type Employee implements Node {
        id: ID!
        firstName: String!
        gender: Gender!
        department: Department!
    }

    type EmployeeConnection {
        totalCount: Int!
        edges: [EmployeeEdge!]!
    }

    type EmployeeEdge {
        node: Employee!
        cursor: String!
    }

    union SearchResult = Department | Employee

    type Query {
        node(id: ID!): Node
        search(text: String!): [SearchResult!]!
    }

    type Mutation {
        mergeEmployee(input: EmployeeInput!): Employee!
    }
"#;

#[test]
fn generates_full_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schema = Schema::parse(SDL).expect("schema");
    let config = GeneratorConfig::new();
    let generator = Generator::new(&schema, &config).expect("generator");

    let written = generator.generate(dir.path()).expect("generate");
    assert_eq!(written.len(), 15);

    for path in [
        "CommonTypes.ts",
        "index.ts",
        "fetchers/index.ts",
        "fetchers/NodeFetcher.ts",
        "fetchers/EmployeeFetcher.ts",
        "fetchers/EmployeeConnectionFetcher.ts",
        "fetchers/EmployeeEdgeFetcher.ts",
        "fetchers/SearchResultFetcher.ts",
        "fetchers/MutationFetcher.ts",
        "enums/Gender.ts",
        "enums/index.ts",
        "inputs/EmployeeInput.ts",
        "inputs/index.ts",
    ] {
        assert!(dir.path().join(path).is_file(), "missing {path}");
    }

    let root_index = fs::read_to_string(dir.path().join("index.ts")).unwrap();
    assert!(root_index.contains("export * from './enums';\n"));
    assert!(root_index.contains("export * from './inputs';\n"));

    let fetchers_index = fs::read_to_string(dir.path().join("fetchers/index.ts")).unwrap();
    assert!(fetchers_index
        .contains("export type { DepartmentFetcher, DepartmentArgs } from './DepartmentFetcher';\n"));
    assert!(fetchers_index.contains("export { employee$, employee$$ } from './EmployeeFetcher';\n"));
    assert!(fetchers_index.contains("export { query$ } from './QueryFetcher';\n"));

    let employee = fs::read_to_string(dir.path().join("fetchers/EmployeeFetcher.ts")).unwrap();
    assert!(employee.contains("import type { Gender } from '../enums';\n"));
    assert!(employee.contains("[node$.fetchableType, searchResult$.fetchableType]"));

    let input = fs::read_to_string(dir.path().join("inputs/EmployeeInput.ts")).unwrap();
    assert!(input.starts_with("import type { Gender } from '../enums';\n"));
}

#[test]
fn regenerating_removes_stale_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stale = dir.path().join("fetchers/StaleFetcher.ts");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "stale").unwrap();
    let keep = dir.path().join("README.md");
    fs::write(&keep, "keep").unwrap();

    let schema = Schema::parse("type Query { ok: Boolean }").expect("schema");
    let config = GeneratorConfig::new();
    Generator::new(&schema, &config)
        .expect("generator")
        .generate(dir.path())
        .expect("generate");

    assert!(!stale.exists());
    assert!(keep.exists());
    assert!(dir.path().join("fetchers/QueryFetcher.ts").is_file());
    assert!(!dir.path().join("enums").exists());
}

#[test]
fn generation_is_deterministic() {
    let schema = Schema::parse(SDL).expect("schema");
    let config = GeneratorConfig::new();
    let generator = Generator::new(&schema, &config).expect("generator");
    let first = generator.render_fetcher("Department").unwrap();
    let second = Generator::new(&schema, &config)
        .expect("generator")
        .render_fetcher("Department")
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn config_from_json_drives_output() {
    let config = GeneratorConfig::from_json_str(
        r#"{"indent": "  ", "fetcherSuffix": "Selection", "excludedProperties": {"Employee": ["gender"]}}"#,
    )
    .expect("config");
    let schema = Schema::parse(SDL).expect("schema");
    let generator = Generator::new(&schema, &config).expect("generator");
    let employee = generator.render_fetcher("Employee").unwrap();
    assert!(employee.contains("export interface EmployeeSelection<"));
    assert!(employee.contains("\n  readonly firstName: "));
    assert!(!employee.contains("gender"));
    assert!(!employee.contains("../enums"));
}

#[test]
fn invalid_schema_is_reported() {
    let schema = Schema::parse("type Query { broken: Missing }").expect("schema");
    let config = GeneratorConfig::new();
    let err = Generator::new(&schema, &config).err().expect("error");
    assert!(err.is_authoring_error());
}

#[test]
fn extensions_reach_generated_output() {
    let schema = Schema::parse(
        r#"
        interface Node { id: ID! }
        extend interface Node { name: String }
        type A implements Node { id: ID! name: String }
        type B implements Node { id: ID! name: String }
        union U = A
        extend union U = B
        type Query { u: U }
        "#,
    )
    .expect("schema");
    let config = GeneratorConfig::new();
    let generator = Generator::new(&schema, &config).expect("generator");

    let members: Vec<&str> = generator
        .context()
        .inheritance()
        .downcast_types("U")
        .expect("downcast")
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(members, vec!["A", "B"]);

    let node = generator.render_fetcher("Node").unwrap();
    assert!(node.contains("\treadonly name: NodeFetcher<T & {readonly \"name\"?: string}, TVariables>;\n"));
    let query = generator.render_fetcher("Query").unwrap();
    assert!(query.contains("child: ObjectFetcher<'U' | 'A' | 'B', X, XVariables>"));
}
