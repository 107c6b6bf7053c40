//! Unit tests for the todo domain and services.
