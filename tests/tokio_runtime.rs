use dioxus_async_resource::prelude::*;
use std::{cell::RefCell, rc::Rc, time::Duration};
use tokio::{task::LocalSet, time::sleep};

#[tokio::test]
async fn resolves_after_delay_on_local_set() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let resource = AsyncResource::auto(
                [1],
                || async {
                    sleep(Duration::from_millis(10)).await;
                    Ok::<_, String>("hello".to_string())
                },
                TokioLocalSpawner,
            );

            let seen = Rc::new(RefCell::new(vec![(
                resource.is_loading(),
                resource.with_state(|state| state.result().cloned()),
            )]));
            let recorder = seen.clone();
            resource.on_update(move |state| {
                recorder
                    .borrow_mut()
                    .push((state.is_loading(), state.result().cloned()));
            });

            sleep(Duration::from_millis(100)).await;

            assert_eq!(
                *seen.borrow(),
                vec![(true, None), (false, Some("hello".to_string()))]
            );
        })
        .await;
}

#[tokio::test]
async fn later_dependency_wins_even_when_it_finishes_first() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let delays = Rc::new(RefCell::new(vec![60_u64, 5]));
            let resource = {
                let delays = delays.clone();
                AsyncResource::auto(
                    1_u32,
                    move || {
                        let delay = delays.borrow_mut().remove(0);
                        async move {
                            sleep(Duration::from_millis(delay)).await;
                            Ok::<_, String>(delay)
                        }
                    },
                    TokioLocalSpawner,
                )
            };
            resource.set_dependencies(2);

            sleep(Duration::from_millis(20)).await;
            assert_eq!(resource.with_state(|state| state.result().copied()), Some(5));
            assert!(!resource.is_loading());

            sleep(Duration::from_millis(80)).await;
            assert_eq!(resource.with_state(|state| state.result().copied()), Some(5));
            assert_eq!(resource.generation().get(), 2);
        })
        .await;
}
