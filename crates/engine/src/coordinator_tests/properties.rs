// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property-based tests for write-through and push invariants.

use super::*;
use ob_core::test_support::strategies::{arb_mutation, Mutation};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap()
}

fn apply(ctx: &TestContext, mutation: &Mutation) {
    ctx.coordinator
        .update(|d| {
            mutation.apply(d);
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Invariant: the local store equals the in-memory record set after
    /// every mutation.
    #[test]
    fn local_store_tracks_every_mutation(
        configured in any::<bool>(),
        mutations in prop::collection::vec(arb_mutation(), 1..25),
    ) {
        runtime().block_on(async {
            let ctx = build(configured, |_| {});
            ctx.coordinator.load_initial_data().await;
            for m in &mutations {
                apply(&ctx, m);
                assert_eq!(ctx.local().load_dataset().data, ctx.coordinator.snapshot());
            }
        });
    }

    /// Invariant: a fresh coordinator over the same store reproduces the
    /// record set when offline.
    #[test]
    fn reload_reproduces_record_set(mutations in prop::collection::vec(arb_mutation(), 0..25)) {
        runtime().block_on(async {
            let ctx = unconfigured();
            ctx.coordinator.load_initial_data().await;
            for m in &mutations {
                apply(&ctx, m);
            }

            let reopened = SyncCoordinator::new(
                ctx.local(),
                ctx.connector.clone(),
                ctx.clock.clone(),
                config(),
            );
            reopened.load_initial_data().await;
            assert_eq!(reopened.snapshot(), ctx.coordinator.snapshot());
        });
    }

    /// Invariant: once flushed, every in-memory record exists remotely with
    /// identical contents.
    #[test]
    fn flush_mirrors_memory_to_remote(mutations in prop::collection::vec(arb_mutation(), 1..25)) {
        runtime().block_on(async {
            let ctx = configured();
            ctx.coordinator.load_initial_data().await;
            for m in &mutations {
                apply(&ctx, m);
            }
            ctx.coordinator.flush_now().await;

            let data = ctx.coordinator.snapshot();
            let remote_projects = ctx.remote.projects();
            for project in &data.projects {
                assert!(remote_projects.contains(project), "missing {}", project.id);
            }
            let remote_employees = ctx.remote.employees();
            for employee in &data.employees {
                assert!(remote_employees.contains(employee), "missing {}", employee.id);
            }
        });
    }
}
