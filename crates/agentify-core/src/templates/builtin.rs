//! Built-in template registry.
//!
//! Each entry is `(name, Tera source)`. A user override file named
//! `<name>.tera` in the custom template directory replaces the built-in
//! source at resolver construction time.

/// All built-in templates, in no particular order.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("server", SERVER),
    ("tool", TOOL),
    ("tools_index", TOOLS_INDEX),
    ("package_json", PACKAGE_JSON),
    ("tsconfig", TSCONFIG),
    ("env_example", ENV_EXAMPLE),
    ("readme", README),
    ("api_docs", API_DOCS),
    ("test_setup", TEST_SETUP),
    ("tool_test", TOOL_TEST),
];

const SERVER: &str = r#"#!/usr/bin/env node
/**
 * {{ server_name }} - MCP server entrypoint.
 *
 * One tool is registered per discovered endpoint. The call-tool dispatcher
 * is a fixed table derived at generation time, so an unknown tool name can
 * only mean the caller is out of sync with this server.
 */
import { Server } from '@modelcontextprotocol/sdk/server/index.js';
import { StdioServerTransport } from '@modelcontextprotocol/sdk/server/stdio.js';
import {
  CallToolRequestSchema,
  ListToolsRequestSchema,
} from '@modelcontextprotocol/sdk/types.js';

import { tools } from './tools/index.js';
{% for endpoint in endpoints -%}
import { {{ endpoint.handler_name }} } from './tools/{{ endpoint.file_safe_name }}.js';
{% endfor %}
const server = new Server(
  { name: '{{ server_name }}', version: '{{ version }}' },
  { capabilities: { tools: {} } }
);

server.setRequestHandler(ListToolsRequestSchema, async () => ({ tools }));

server.setRequestHandler(CallToolRequestSchema, async (request) => {
  const { name, arguments: args } = request.params;
  switch (name) {
{% for endpoint in endpoints -%}
    case '{{ endpoint.tool_name }}':
      return {{ endpoint.handler_name }}(args ?? {});
{% endfor -%}
    default:
      throw new Error(`Method not found: ${name}`);
  }
});

async function main() {
  const transport = new StdioServerTransport();
  await server.connect(transport);
  if ((process.env.LOG_LEVEL ?? 'info') !== 'error') {
    console.error('{{ server_name }} running on stdio');
  }
}

main().catch((error) => {
  console.error('Fatal error:', error);
  process.exit(1);
});
"#;

const TOOL: &str = r#"/**
 * {{ description }}
 *
 * {{ method }} {{ path }}
 */
const API_BASE_URL = process.env.API_BASE_URL ?? 'http://localhost:3000';

export const {{ file_safe_name }}Tool = {
  name: '{{ tool_name }}',
  description: {{ description | json_encode }},
  inputSchema: {
    type: 'object',
    properties: {
{%- for param in params %}
      '{{ param.name }}': {
        type: '{{ param.type }}',
        description: {{ param.description | json_encode }}{% if param.required %},
        required: true{% endif %}
      }{% if not loop.last %},{% endif %}
{%- endfor %}
    },
  },
};

export async function {{ handler_name }}(args{% if typescript %}: Record<string, unknown>{% endif %}) {
  let path = '{{ path }}';
{%- for param in path_params %}
  path = path.replace('{{ param.token }}', encodeURIComponent(String(args['{{ param.name }}'])));
{%- endfor %}
  const url = new URL(`${API_BASE_URL}${path}`);
{%- for param in query_params %}
  if (args['{{ param.name }}'] !== undefined) {
    url.searchParams.set('{{ param.name }}', String(args['{{ param.name }}']));
  }
{%- endfor %}

  const headers{% if typescript %}: Record<string, string>{% endif %} = {
    'Content-Type': 'application/json',
  };
  if (process.env.API_KEY) {
    headers['Authorization'] = `Bearer ${process.env.API_KEY}`;
  }

  const response = await fetch(url, {
    method: '{{ method }}',
    headers,
{%- if has_body %}
    body: args['body'] !== undefined ? JSON.stringify(args['body']) : undefined,
{%- endif %}
  });

  const text = await response.text();
  if (!response.ok) {
    throw new Error(`{{ method }} {{ path }} failed: ${response.status} ${text}`);
  }

  return { content: [{ type: 'text', text }] };
}
"#;

const TOOLS_INDEX: &str = r#"/**
 * Aggregated tool exports for {{ server_name }}.
 */
{% for endpoint in endpoints -%}
import { {{ endpoint.file_safe_name }}Tool } from './{{ endpoint.file_safe_name }}.js';
{% endfor %}
export const tools = [
{% for endpoint in endpoints -%}
  {{ endpoint.file_safe_name }}Tool,
{% endfor -%}
];

export const toolMap = Object.fromEntries(tools.map((tool) => [tool.name, tool]));
"#;

const PACKAGE_JSON: &str = r#"{
  "name": "{{ server_name | kebab_case }}",
  "version": "{{ version }}",
  "description": {{ server_description | json_encode }},
  "type": "module",
{%- if typescript %}
  "main": "dist/index.js",
  "scripts": {
    "build": "tsc",
    "start": "node dist/index.js",
    "dev": "tsx src/index.ts"{% if include_tests %},
    "test": "vitest run"{% endif %}
  },
{%- else %}
  "main": "src/index.js",
  "scripts": {
    "start": "node src/index.js"{% if include_tests %},
    "test": "vitest run"{% endif %}
  },
{%- endif %}
  "dependencies": {
    "@modelcontextprotocol/sdk": "^1.0.0"
  }{% if typescript or include_tests %},
  "devDependencies": {
{%- if typescript %}
    "@types/node": "^20.11.0",
    "tsx": "^4.7.0",
    "typescript": "^5.3.0"{% if include_tests %},{% endif %}
{%- endif %}
{%- if include_tests %}
    "vitest": "^1.2.0"
{%- endif %}
  }{% endif %}
}
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2022",
    "module": "NodeNext",
    "moduleResolution": "NodeNext",
    "outDir": "dist",
    "rootDir": "src",
    "strict": true,
    "esModuleInterop": true,
    "skipLibCheck": true,
    "declaration": true
  },
  "include": ["src/**/*"],
  "exclude": ["node_modules", "dist", "tests"]
}
"#;

const ENV_EXAMPLE: &str = r#"# Base URL of the upstream API that tool calls are proxied to
API_BASE_URL={% if base_url %}{{ base_url }}{% else %}http://localhost:3000{% endif %}

# Optional bearer token, sent as an Authorization header when set
API_KEY=

# Port for HTTP transports (the default stdio transport ignores it)
PORT=3000

# Log verbosity: debug | info | warn | error
LOG_LEVEL=info
"#;

const README: &str = r#"# {{ server_name }}

{{ server_description }}

This MCP server was generated from `{{ project_name }}` and exposes
{{ endpoints | length }} tool{{ endpoints | length | pluralize }} over stdio.

## Setup

```bash
npm install
cp .env.example .env
{% if typescript %}npm run build
npm start
{%- else %}npm start
{%- endif %}
```

## Configuration

| Variable | Purpose |
| --- | --- |
| `API_BASE_URL` | Base URL of the upstream API (default `http://localhost:3000`) |
| `API_KEY` | Optional bearer token for upstream requests |
| `PORT` | Port for HTTP transports |
| `LOG_LEVEL` | Log verbosity |

## Tools

| Tool | Endpoint |
| --- | --- |
{% for endpoint in endpoints -%}
| `{{ endpoint.tool_name }}` | `{{ endpoint.method }} {{ endpoint.path }}` |
{% endfor %}
{%- if include_documentation %}
See `docs/API.md` for per-tool parameter details.
{%- endif %}
"#;

const API_DOCS: &str = r#"# {{ server_name }} API

{{ server_description }}

{% for endpoint in endpoints %}
## `{{ endpoint.tool_name }}`

`{{ endpoint.method }} {{ endpoint.path }}`

{{ endpoint.description }}
{% if endpoint.params %}
| Parameter | Location | Type | Required |
| --- | --- | --- | --- |
{% for param in endpoint.params -%}
| `{{ param.name }}` | {{ param.location }} | {{ param.type }} | {% if param.required %}yes{% else %}no{% endif %} |
{% endfor %}
{%- else %}
No parameters.
{% endif %}
{%- endfor %}
"#;

const TEST_SETUP: &str = r#"import { beforeAll } from 'vitest';

beforeAll(() => {
  process.env.API_BASE_URL = 'http://localhost:3000';
  process.env.API_KEY = 'test-key';
});
"#;

const TOOL_TEST: &str = r#"import { describe, expect, it } from 'vitest';

import { {{ file_safe_name }}Tool } from '../../src/tools/{{ file_safe_name }}.js';

describe('{{ tool_name }}', () => {
  it('exposes the derived tool name', () => {
    expect({{ file_safe_name }}Tool.name).toBe('{{ tool_name }}');
  });

  it('declares an object input schema', () => {
    expect({{ file_safe_name }}Tool.inputSchema.type).toBe('object');
{%- for param in path_params %}
    expect({{ file_safe_name }}Tool.inputSchema.properties['{{ param.name }}'].required).toBe(true);
{%- endfor %}
  });
});
"#;
