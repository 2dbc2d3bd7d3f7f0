/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use async_trait::async_trait;
use biblio_core::{BiblioEntry, IssuedDate, LongFormEntry, ReferenceKey, ShortFormEntry};
use biblio_resolver::{FetchedBatch, MetadataSource};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// --- Fixture builders ---

pub fn key(k: &str) -> ReferenceKey {
    ReferenceKey::from(k)
}

pub fn keys(list: &[&str]) -> Vec<ReferenceKey> {
    list.iter().map(|k| ReferenceKey::from(*k)).collect()
}

pub fn short(title: &str) -> BiblioEntry {
    BiblioEntry::from(ShortFormEntry {
        title: title.to_string(),
        href: Some(format!("https://example.org/{}", title.to_lowercase().replace(' ', "-"))),
        ..Default::default()
    })
}

pub fn long(doi: &str, title: &str) -> BiblioEntry {
    BiblioEntry::from(LongFormEntry {
        title: title.to_string(),
        doi: Some(doi.to_string()),
        issued: Some(IssuedDate::year(2020)),
        ..Default::default()
    })
}

// --- Scripted sources ---

/// A source that answers from a fixed table and records every request.
pub struct StaticSource {
    name: &'static str,
    entries: IndexMap<ReferenceKey, BiblioEntry>,
    unrequested: IndexMap<ReferenceKey, BiblioEntry>,
    expires: Option<DateTime<Utc>>,
    fail: bool,
    calls: Mutex<Vec<Vec<ReferenceKey>>>,
}

impl StaticSource {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: IndexMap::new(),
            unrequested: IndexMap::new(),
            expires: None,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A source whose every request fails.
    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn with(mut self, k: &str, entry: BiblioEntry) -> Self {
        self.entries.insert(key(k), entry);
        self
    }

    /// An entry returned with every response, asked for or not.
    pub fn with_unrequested(mut self, k: &str, entry: BiblioEntry) -> Self {
        self.unrequested.insert(key(k), entry);
        self
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn calls(&self) -> Vec<Vec<ReferenceKey>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl MetadataSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, keys: &[ReferenceKey]) -> Option<FetchedBatch> {
        self.calls.lock().push(keys.to_vec());
        if self.fail {
            return None;
        }
        let mut entries: IndexMap<ReferenceKey, BiblioEntry> = keys
            .iter()
            .filter_map(|k| self.entries.get(k).map(|e| (k.clone(), e.clone())))
            .collect();
        entries.extend(self.unrequested.clone());
        Some(FetchedBatch {
            entries,
            expires: self.expires,
        })
    }
}

pub fn shared(source: StaticSource) -> Arc<StaticSource> {
    Arc::new(source)
}

// --- Throwaway HTTP responder ---

pub struct TestServer {
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Request lines (`GET /path?query HTTP/1.1`) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn url(&self, path: &str) -> url::Url {
        url::Url::parse(&format!("{}{}", self.base, path)).unwrap()
    }
}

/// Serve the same canned response to every connection.
pub async fn serve(status: u16, headers: &[(&str, &str)], body: &str) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    let mut response = format!(
        "HTTP/1.1 {} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
        status,
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    response.push_str(body);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 16 * 1024];
            let mut read = 0;
            while read < buf.len() {
                let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                read += n;
                if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let request = String::from_utf8_lossy(&buf[..read]);
            let line = request.lines().next().unwrap_or_default().to_string();
            seen.lock().push(line);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    TestServer {
        base: format!("http://{}", addr),
        requests,
    }
}

/// A URL on which nothing is listening.
pub async fn dead_url() -> url::Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    url::Url::parse(&format!("http://{}/bibrefs", addr)).unwrap()
}
