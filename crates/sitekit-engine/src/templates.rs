//! The bundled template set
//!
//! Each template is a text body with `{{ name }}` placeholders, resolved at
//! scaffold time. The six manifests carry numeric prefixes encoding the
//! apply order: namespace before the claim, config, and deployment; the
//! deployment before the service; the service before the ingress.

/// One bundled template
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    /// Path relative to the project root
    pub rel_path: &'static str,
    /// Template body with placeholders
    pub body: &'static str,
}

/// Every bundled template, manifests in topology order
pub const TEMPLATES: &[TemplateFile] = &[
    TemplateFile {
        rel_path: "manifests/01-namespace.yaml",
        body: NAMESPACE,
    },
    TemplateFile {
        rel_path: "manifests/02-pvc.yaml",
        body: PVC,
    },
    TemplateFile {
        rel_path: "manifests/03-configmap.yaml",
        body: CONFIGMAP,
    },
    TemplateFile {
        rel_path: "manifests/04-deployment.yaml",
        body: DEPLOYMENT,
    },
    TemplateFile {
        rel_path: "manifests/05-service.yaml",
        body: SERVICE,
    },
    TemplateFile {
        rel_path: "manifests/06-ingress.yaml",
        body: INGRESS,
    },
    TemplateFile {
        rel_path: "Dockerfile",
        body: DOCKERFILE,
    },
    TemplateFile {
        rel_path: "README.md",
        body: README,
    },
    TemplateFile {
        rel_path: ".gitignore",
        body: GITIGNORE,
    },
    TemplateFile {
        rel_path: "content/index.html",
        body: INDEX_HTML,
    },
    TemplateFile {
        rel_path: "scripts/build.py",
        body: BUILD_SCRIPT,
    },
];

/// Path inside the serving container where content is mounted
pub const SERVING_PATH: &str = "/usr/share/nginx/html";

/// Path inside the project image where built content lives
pub const IMAGE_CONTENT_PATH: &str = "/site";

const NAMESPACE: &str = r#"apiVersion: v1
kind: Namespace
metadata:
  name: {{ namespace }}
  labels:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
    app.kubernetes.io/component: app
    app.kubernetes.io/managed-by: sitekit
"#;

const PVC: &str = r#"apiVersion: v1
kind: PersistentVolumeClaim
metadata:
  name: {{ project_name }}-content
  namespace: {{ namespace }}
  labels:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
    app.kubernetes.io/component: storage
    app.kubernetes.io/managed-by: sitekit
spec:
  accessModes:
    - ReadWriteMany
  storageClassName: {{ storage_class }}
  resources:
    requests:
      storage: {{ storage_size }}
"#;

const CONFIGMAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: {{ project_name }}-nginx
  namespace: {{ namespace }}
  labels:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
    app.kubernetes.io/component: config
    app.kubernetes.io/managed-by: sitekit
data:
  default.conf: |
    server {
        listen 80;
        server_name {{ domain }};
        root /usr/share/nginx/html;
        index index.html;

        location / {
            try_files $uri $uri/ /index.html;
        }

        location = /healthz {
            access_log off;
            return 200 "ok";
        }
    }
"#;

const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ project_name }}
  namespace: {{ namespace }}
  labels:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
    app.kubernetes.io/component: app
    app.kubernetes.io/managed-by: sitekit
spec:
  replicas: {{ replicas }}
  selector:
    matchLabels:
      app.kubernetes.io/name: {{ project_name }}
      app.kubernetes.io/instance: {{ project_name }}
  template:
    metadata:
      labels:
        app.kubernetes.io/name: {{ project_name }}
        app.kubernetes.io/instance: {{ project_name }}
        app.kubernetes.io/component: app
        app.kubernetes.io/managed-by: sitekit
    spec:
      initContainers:
        - name: content-seed
          image: "{{ image }}"
          command: ["sh", "-c", "cp -r /site/. /content/"]
          volumeMounts:
            - name: content
              mountPath: /content
      containers:
        - name: nginx
          image: nginx:1.27-alpine
          ports:
            - name: http
              containerPort: 80
              protocol: TCP
          resources:
            limits:
              memory: {{ memory_limit }}
              cpu: {{ cpu_limit }}
          readinessProbe:
            httpGet:
              path: /healthz
              port: http
          volumeMounts:
            - name: content
              mountPath: /usr/share/nginx/html
            - name: nginx-conf
              mountPath: /etc/nginx/conf.d
      volumes:
        - name: content
          persistentVolumeClaim:
            claimName: {{ project_name }}-content
        - name: nginx-conf
          configMap:
            name: {{ project_name }}-nginx
"#;

const SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: {{ project_name }}
  namespace: {{ namespace }}
  labels:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
    app.kubernetes.io/component: app
    app.kubernetes.io/managed-by: sitekit
spec:
  type: ClusterIP
  ports:
    - port: 80
      targetPort: http
      protocol: TCP
      name: http
  selector:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
"#;

const INGRESS: &str = r#"apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: {{ project_name }}
  namespace: {{ namespace }}
  labels:
    app.kubernetes.io/name: {{ project_name }}
    app.kubernetes.io/instance: {{ project_name }}
    app.kubernetes.io/component: app
    app.kubernetes.io/managed-by: sitekit
  annotations:
    cert-manager.io/cluster-issuer: {{ cert_issuer }}
spec:
  ingressClassName: {{ ingress_class }}
  tls:
    - hosts:
        - {{ domain }}
      secretName: {{ project_name }}-tls
  rules:
    - host: {{ domain }}
      http:
        paths:
          - path: /
            pathType: Prefix
            backend:
              service:
                name: {{ project_name }}
                port:
                  name: http
"#;

const DOCKERFILE: &str = r#"# Build stage: run the site build against the content directory
FROM python:{{ runtime_version }}-slim AS build
WORKDIR /build
COPY content/ content/
COPY scripts/ scripts/
RUN python scripts/build.py

# Serve stage: built content only, picked up by the init container
FROM busybox:1.37
COPY --from=build /build/dist /site
CMD ["sleep", "infinity"]
"#;

const README: &str = r#"# {{ project_name }}

Static site deployed to Kubernetes with sitekit.

Serving https://{{ domain }} from namespace `{{ namespace }}`.

## Quickstart

```sh
sitekit build        # content/ -> dist/
sitekit deploy       # apply the six manifests in order
sitekit status       # what is running
sitekit open         # print the site URL
```

## Layout

- `content/` - your site sources
- `scripts/build.py` - build hook, replace with any generator you like
- `manifests/` - the six ordered manifests (namespace, storage claim,
  nginx config, deployment, service, ingress)
- `sitekit.yaml` - project configuration
- `credentials.yaml` - generated admin credentials; never commit this file

## Content sync

`sitekit sync` pushes the built `dist/` directory into every running
replica (run `sitekit build` first), skipping the image build. It feels
instant, but it bypasses the build
pipeline and leaves no audit trail: what is running no longer matches any
built image. Do not use it against production.
"#;

const GITIGNORE: &str = r#"# sitekit
credentials.yaml
dist/
*.tar.gz
"#;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ project_name }}</title>
</head>
<body>
  <h1>{{ project_name }}</h1>
  <p>Served at {{ domain }}. Edit content/index.html and run sitekit build.</p>
</body>
</html>
"#;

const BUILD_SCRIPT: &str = r#"#!/usr/bin/env python3
"""Build hook for {{ project_name }}.

The default build copies content/ to dist/ unchanged. Replace this with
any static site generator invocation; sitekit only cares that dist/ ends
up holding the files to serve.
"""

import shutil
import sys
from pathlib import Path

content = Path("content")
dist = Path("dist")

if not content.is_dir():
    sys.exit("content/ directory not found")

if dist.exists():
    shutil.rmtree(dist)

shutil.copytree(content, dist)
print(f"built {sum(1 for p in dist.rglob('*') if p.is_file())} file(s) into dist/")
"#;
