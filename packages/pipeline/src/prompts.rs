// ABOUTME: Task prompts for specification extraction and every generation stage
// ABOUTME: Structured prompts with a strict JSON output contract and exact path rules

use stackforge_core::{Field, Resource};

/// Output contract appended to every stage task. Stages parse the response
/// with `response::parse_artifact_list`, so the collaborator must not emit
/// anything besides the artifact array.
pub const ARTIFACT_CONTRACT: &str = r#"OUTPUT FORMAT:
Return ONLY a JSON array of file objects, no other text:

[
  {"path": "relative/path/with.extension", "content": "full file content", "description": "what this file contains"}
]

PATH RULES:
- Every path is relative to the output root and must include a file extension
- Files belong in subdirectories (backend/, frontend/, ...); only deployment
  files (docker-compose.yml, README.md, .gitignore, .env.example) may sit at
  the root
- Never emit a bare directory name as a path"#;

fn render_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| format!("  - {}: {}", f.name, f.field_type.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for converting a free-text description into a Project Specification.
pub fn extraction_prompt(description: &str) -> String {
    format!(
        r#"Analyze the following application description and extract structured information.

USER DESCRIPTION:
{description}

YOUR TASK:
Extract and return a JSON object with the following structure:
{{
    "project_name": "A concise name for the project (kebab-case)",
    "description": "Brief description of what the app does",
    "resources": [
        {{
            "name": "ResourceName (singular, PascalCase)",
            "fields": [
                {{"name": "field_name", "type": "str|int|float|bool|date"}}
            ]
        }}
    ],
    "features": ["List of main features to implement"],
    "tech_preferences": {{
        "backend": "fastapi|django|flask",
        "frontend": "react|vue|angular",
        "database": "sqlite|postgresql|mongodb|none"
    }},
    "include_tests": true,
    "include_docker": true,
    "add_database": false
}}

INSTRUCTIONS:
1. Identify the main entities/resources in the description
2. For each resource, determine appropriate fields with types
3. If no specific project name is mentioned, create a descriptive one
4. Default to fastapi + react + sqlite + tests + docker unless specified otherwise
5. Infer field types from names (email -> str, age -> int, price -> float)
6. Include common fields like id and created_at automatically
7. Return ONLY the JSON object, no other text"#
    )
}

/// Prompt for refining an existing specification from user feedback.
pub fn refinement_prompt(spec_json: &str, feedback: &str) -> String {
    format!(
        r#"Given this current project specification:

{spec_json}

And this user feedback:
{feedback}

Update the specification to incorporate the feedback.
Return the updated JSON object with the same structure.
Only return the JSON, no other text."#
    )
}

/// Task for generating the backend service layer.
pub fn backend_task(project_name: &str, resource: &Resource) -> String {
    let endpoint = resource.endpoint_name();
    format!(
        r#"Create a FastAPI backend project.

PROJECT: {project_name}
RESOURCE: {resource_name}
FIELDS:
{fields}

Produce these files:

a) backend/main.py - FastAPI application with:
   - CORS middleware configuration
   - Pydantic model for {resource_name} with the fields above
   - In-memory storage list
   - Health check endpoint: GET /
   - CRUD endpoints:
     * GET /{endpoint} - List all
     * POST /{endpoint} - Create new
     * GET /{endpoint}/{{id}} - Get by ID
     * PUT /{endpoint}/{{id}} - Update by ID
     * DELETE /{endpoint}/{{id}} - Delete by ID

b) backend/requirements.txt - fastapi>=0.104.0, uvicorn[standard]>=0.24.0, pydantic>=2.0.0

c) backend/Dockerfile - python:3.11-slim base, install requirements, expose 8000,
   CMD uvicorn main:app --host 0.0.0.0 --port 8000

d) backend/.dockerignore - __pycache__/, *.pyc, .pytest_cache/, .env

The resource is {resource_name} (singular); endpoints use {endpoint} (plural).

{contract}"#,
        resource_name = resource.name,
        fields = render_fields(&resource.fields),
        contract = ARTIFACT_CONTRACT,
    )
}

/// Task for adding JWT authentication to an existing backend.
pub fn auth_task(project_path: &str) -> String {
    format!(
        r#"Add JWT authentication to the FastAPI backend at {project_path}:

1. Add python-jose, passlib, bcrypt to {project_path}/requirements.txt
2. Create {project_path}/auth.py with JWT token generation and verification
3. Update {project_path}/main.py with a login endpoint and a protected route example

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for adding SQLAlchemy database integration to an existing backend.
pub fn database_task(project_path: &str, db_type: &str) -> String {
    format!(
        r#"Add {db_type} database integration to the backend at {project_path}:

1. Add SQLAlchemy to {project_path}/requirements.txt
2. Create {project_path}/database.py with SQLAlchemy setup for {db_type}
3. Create {project_path}/models.py with database models
4. Update {project_path}/main.py to use the database instead of in-memory storage

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for generating the frontend client layer.
pub fn frontend_task(project_name: &str, resource: &Resource, api_url: &str) -> String {
    let endpoint = resource.endpoint_name();
    format!(
        r#"Create a React frontend project.

PROJECT: {project_name}
RESOURCE: {resource_name}
API URL: {api_url}

Produce these files:

a) frontend/package.json - react 18, react-dom, react-scripts start/build/test scripts,
   name "{project_name}"
b) frontend/public/index.html - HTML template with <div id="root"></div>, title {project_name}
c) frontend/src/index.js - React entry point using ReactDOM.createRoot
d) frontend/src/index.css - Global styles
e) frontend/src/App.js - Main component:
   - useState for {resource_name} items
   - useEffect fetching {api_url}/{endpoint} on mount
   - List, add, and delete functionality
f) frontend/src/App.css - Component styling
g) frontend/Dockerfile - Build with node:16-alpine, serve with nginx:alpine
h) frontend/.dockerignore - node_modules/, build/, .git/

The API endpoints must match /{endpoint}.

{contract}"#,
        resource_name = resource.name,
        contract = ARTIFACT_CONTRACT,
    )
}

/// Task for adding a create/edit form component.
pub fn form_task(project_path: &str, resource_name: &str, fields: &[Field]) -> String {
    format!(
        r#"Add a form component to the React frontend at {project_path}:

1. Create {project_path}/src/components/Form.js with a form for {resource_name}
2. Include fields:
{fields}
3. Add form validation
4. Update {project_path}/src/App.js to use the form for creating new items

{contract}"#,
        fields = render_fields(fields),
        contract = ARTIFACT_CONTRACT,
    )
}

/// Task for adding client-side routing.
pub fn routing_task(project_path: &str) -> String {
    format!(
        r#"Add React Router to the frontend at {project_path}:

1. Add react-router-dom to {project_path}/package.json
2. Create {project_path}/src/components/Navbar.js
3. Create {project_path}/src/pages/Home.js and {project_path}/src/pages/About.js
4. Update {project_path}/src/App.js with routing configuration

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for restyling the frontend.
pub fn styling_task(project_path: &str, framework: &str) -> String {
    let step_one = if framework == "custom" {
        "1. Enhance the existing custom CSS".to_string()
    } else {
        format!("1. Add {framework} to {project_path}/package.json")
    };
    format!(
        r#"Improve the frontend styling at {project_path}:

{step_one}
2. Update components with better styling
3. Add responsive design
4. Add loading states and error handling UI

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for generating backend API tests.
pub fn backend_tests_task(project_name: &str, resource: &Resource, endpoints: &[String]) -> String {
    let lower = resource.name.to_lowercase();
    format!(
        r#"Create comprehensive pytest tests for the FastAPI backend.

PROJECT: {project_name}
RESOURCE: {resource_name}
ENDPOINTS TO TEST: {endpoints}

Produce these files:

a) backend/tests/__init__.py - empty package marker
b) backend/tests/conftest.py - TestClient fixture importing the app from main,
   plus sample {resource_name} data fixtures
c) backend/tests/test_main.py - health check test plus CRUD tests:
   test_get_all_{lower}s, test_create_{lower}, test_get_{lower}_by_id,
   test_update_{lower}, test_delete_{lower}, and 404/422 error cases
d) backend/tests/test_models.py - Pydantic model validation tests

Also emit an updated backend/requirements.txt including pytest>=7.4.0 and httpx.

{contract}"#,
        resource_name = resource.name,
        endpoints = endpoints.join(", "),
        contract = ARTIFACT_CONTRACT,
    )
}

/// Task for generating frontend component tests.
pub fn frontend_tests_task(project_name: &str, components: &[String]) -> String {
    format!(
        r#"Create React Testing Library tests for the frontend.

PROJECT: {project_name}
COMPONENTS TO TEST: {components}

Produce these files:

a) frontend/src/setupTests.js - imports @testing-library/jest-dom
b) frontend/src/App.test.js - render, loading state, fetch, create, delete,
   and error handling tests
c) One test file per listed component under frontend/src/

Also emit an updated frontend/package.json including @testing-library/react,
@testing-library/jest-dom, and @testing-library/user-event.

{contract}"#,
        components = components.join(", "),
        contract = ARTIFACT_CONTRACT,
    )
}

/// Task for generating end-to-end workflow tests.
pub fn integration_tests_task(project_name: &str) -> String {
    format!(
        r#"Create integration tests for {project_name}:

1. Create tests/integration/test_full_workflow.py exercising create, fetch,
   update, and delete against the running API
2. Emit an updated README.md section describing how to run them

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for adding coverage configuration.
pub fn coverage_task(project_path: &str) -> String {
    format!(
        r#"Add code coverage configuration to the project at {project_path}:

Backend:
1. Add pytest-cov to backend/requirements.txt
2. Create backend/pytest.ini with coverage configuration

Frontend:
1. Update frontend/package.json scripts to include coverage
2. Create frontend/jest.config.js if needed

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for generating the root-level deployment configuration.
pub fn compose_task(project_name: &str, has_database: bool, db_kind: &str) -> String {
    let database_service = if has_database {
        format!("     * database: {db_kind} service with a persistent volume; backend depends_on it")
    } else {
        String::new()
    };
    format!(
        r#"Create Docker deployment configuration for {project_name}.

Produce these files, all at the OUTPUT ROOT (they are the only files allowed there):

a) docker-compose.yml:
   - services:
     * backend: build ./backend, ports ["8000:8000"]
     * frontend: build ./frontend, ports ["3000:80"], depends_on backend
{database_service}
   - networks: [app-network]

b) README.md - project title {project_name}, description, Quick Start
   (docker-compose up --build, access URLs), manual setup, project structure,
   API documentation sections

c) .gitignore - __pycache__/, *.pyc, .env, node_modules/, build/,
   .pytest_cache/, *.log

Dockerfiles already exist in backend/ and frontend/; do not recreate them.

{contract}"#,
        contract = ARTIFACT_CONTRACT,
    )
}

/// Task for adding an nginx reverse proxy to the deployment.
pub fn nginx_task(project_path: &str) -> String {
    format!(
        r#"Add an nginx reverse proxy to the deployment at {project_path}:

1. Create nginx/nginx.conf with proxy configuration for backend and frontend
2. Emit an updated docker-compose.yml adding the nginx service on port 80

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for generating Kubernetes manifests.
pub fn k8s_task(project_name: &str) -> String {
    format!(
        r#"Generate Kubernetes configuration for {project_name}:

1. k8s/backend-deployment.yaml and k8s/backend-service.yaml
2. k8s/frontend-deployment.yaml and k8s/frontend-service.yaml
3. k8s/ingress.yaml
4. k8s/configmap.yaml for environment variables

{ARTIFACT_CONTRACT}"#
    )
}

/// Task for adding a database service to an existing compose file.
pub fn database_service_task(project_path: &str, db_type: &str) -> String {
    format!(
        r#"Add a {db_type} database service to the deployment at {project_path}:

1. Emit an updated docker-compose.yml with a {db_type} service: proper image,
   environment variables, a volume for data persistence, and a port mapping
2. Make the backend service depend on the database and receive its
   connection string through the environment

{ARTIFACT_CONTRACT}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::{FieldType, Resource};

    fn post_resource() -> Resource {
        Resource::new(
            "Post",
            vec![
                Field::new("title", FieldType::Str),
                Field::new("content", FieldType::Str),
            ],
        )
    }

    #[test]
    fn test_backend_task_names_endpoints() {
        let task = backend_task("blog", &post_resource());
        assert!(task.contains("GET /posts"));
        assert!(task.contains("backend/main.py"));
        assert!(task.contains(ARTIFACT_CONTRACT));
    }

    #[test]
    fn test_extraction_prompt_embeds_description() {
        let prompt = extraction_prompt("a todo app");
        assert!(prompt.contains("a todo app"));
        assert!(prompt.contains("project_name"));
    }

    #[test]
    fn test_compose_task_conditionally_includes_database() {
        assert!(compose_task("blog", true, "sqlite").contains("database:"));
        assert!(!compose_task("blog", false, "sqlite").contains("database:"));
    }

    #[test]
    fn test_render_fields_one_per_line() {
        let rendered = render_fields(&post_resource().fields);
        assert_eq!(rendered, "  - title: str\n  - content: str");
    }
}
