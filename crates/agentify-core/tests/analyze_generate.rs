//! End-to-end tests: analyze a mixed-language fixture project, then generate
//! the MCP server and verify the output tree.

use std::fs;
use std::path::Path;

use agentify_core::{analyze, generate, McpConfig, ProjectType, TemplateResolver};
use tempfile::{tempdir, TempDir};

const FLASK_API: &str = r#"
from flask import Flask, request, jsonify

app = Flask(__name__)

@app.route('/api/products', methods=['GET'])
def get_products():
    return jsonify({'products': []})

@app.route('/api/products', methods=['POST'])
def create_product():
    return jsonify({'message': 'Product created'})

@app.route('/api/products/<int:id>', methods=['GET'])
def get_product(id):
    return jsonify({'product': {'id': id}})

@app.route('/api/products/<int:id>', methods=['PUT'])
def update_product(id):
    return jsonify({'message': 'updated'})

@app.route('/api/products/<int:id>', methods=['DELETE'])
def delete_product(id):
    return jsonify({'message': 'deleted'})

@app.route('/api/categories', methods=['GET', 'POST'])
def categories():
    return jsonify({'categories': []})
"#;

const GIN_API: &str = r#"
package main

import "github.com/gin-gonic/gin"

func main() {
    r := gin.Default()
    r.GET("/api/items", listItems)
    r.POST("/api/items", createItem)
    r.GET("/api/items/:id", getItem)
    r.PUT("/api/items/:id", updateItem)
    r.DELETE("/api/items/:id", deleteItem)
    r.Run(":8080")
}
"#;

fn fixture_project() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("flask_api.py"), FLASK_API).unwrap();
    fs::write(dir.path().join("main.go"), GIN_API).unwrap();
    dir
}

#[tokio::test]
async fn analyze_detects_rest_api_and_finds_all_endpoints() {
    let dir = fixture_project();
    let info = analyze(dir.path(), None).await.unwrap();

    assert_eq!(info.project_type, ProjectType::RestApi);
    let keys: Vec<_> = info.endpoints.iter().map(|e| e.key()).collect();
    assert_eq!(
        keys,
        vec![
            // flask_api.py scans before main.go
            "GET:/api/products",
            "POST:/api/products",
            "GET:/api/products/{id}",
            "PUT:/api/products/{id}",
            "DELETE:/api/products/{id}",
            "GET:/api/categories",
            "POST:/api/categories",
            "GET:/api/items",
            "POST:/api/items",
            "GET:/api/items/{id}",
            "PUT:/api/items/{id}",
            "DELETE:/api/items/{id}",
        ]
    );
}

#[tokio::test]
async fn analyze_twice_is_byte_identical() {
    let dir = fixture_project();
    let first = analyze(dir.path(), None).await.unwrap();
    let second = analyze(dir.path(), None).await.unwrap();
    assert_eq!(
        serde_json::to_vec(&first.endpoints).unwrap(),
        serde_json::to_vec(&second.endpoints).unwrap()
    );
}

#[tokio::test]
async fn generate_builds_one_tool_per_surviving_endpoint() {
    let dir = fixture_project();
    let info = analyze(dir.path(), None).await.unwrap();

    let config = McpConfig {
        exclude_endpoints: vec!["DELETE:/api/items/{id}".to_string()],
        ..Default::default()
    };
    let out = tempdir().unwrap();
    let resolver = TemplateResolver::new(None).unwrap();
    let report = generate(&info, &config, out.path(), false, &resolver)
        .await
        .unwrap();

    let tools_dir = out.path().join("src").join("tools");
    let tool_count = fs::read_dir(&tools_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != "index.ts")
        .count();
    assert_eq!(tool_count, info.endpoints.len() - 1);

    // The excluded endpoint appears nowhere in the generated tree
    assert!(!tools_dir.join("deleteApiItemsId.ts").exists());
    let index = fs::read_to_string(out.path().join("src").join("index.ts")).unwrap();
    assert!(!index.contains("delete_api_items_id"));

    // Tool names in list order match the aggregator order minus exclusions
    let tools_index = fs::read_to_string(tools_dir.join("index.ts")).unwrap();
    assert!(tools_index.contains("getApiProductsTool"));
    assert!(report.written_files().iter().any(|p| p.ends_with(Path::new("README.md"))));
}

#[tokio::test]
async fn dry_run_and_real_run_report_the_same_paths() {
    let dir = fixture_project();
    let info = analyze(dir.path(), None).await.unwrap();
    let config = McpConfig::default();
    let resolver = TemplateResolver::new(None).unwrap();

    let out = tempdir().unwrap();
    let target = out.path().join("server");
    let dry = generate(&info, &config, &target, true, &resolver).await.unwrap();
    assert!(!target.exists(), "dry run must not create the output directory");

    let real = generate(&info, &config, &target, false, &resolver).await.unwrap();
    assert_eq!(dry.actions, real.actions);
    for path in real.written_files() {
        assert!(path.is_file(), "missing {}", path.display());
    }
}
