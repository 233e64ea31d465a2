use std::num::NonZeroUsize;

use comms::specs::{OptimizerSpec, ParamGenSpec, ServerSpec, VariableSpec};
use ml_core::{Gradient, Gradienter, SampleSet, Subset, Variable};
use parameter_server::ServerBuilder;
use rand::{SeedableRng, rngs::StdRng};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use worker::{ParamClient, Worker, WorkerConfig};

type Samples = Vec<(f64, f64)>;

/// Mean squared error of `y = w * x + b`.
struct Linear {
    w: Variable,
    b: Variable,
    grad: Gradient,
}

impl Linear {
    fn new(w: Variable, b: Variable) -> Self {
        Self {
            grad: Gradient::zeros(&[w.clone(), b.clone()]),
            w,
            b,
        }
    }
}

impl Gradienter<Samples> for Linear {
    fn gradient(&mut self, batch: &Subset<'_, Samples>) -> &Gradient {
        let w = self.w.read()[0];
        let b = self.b.read()[0];
        let n = batch.len().max(1) as f64;

        let (mut dw, mut db) = (0., 0.);
        for &(x, y) in batch.iter() {
            let err = w * x + b - y;
            dw += err * x;
            db += err;
        }

        if let Some(g) = self.grad.get_mut(&self.w) {
            g[0] = dw / n;
        }
        if let Some(g) = self.grad.get_mut(&self.b) {
            g[0] = db / n;
        }

        &self.grad
    }
}

fn server_spec() -> ServerSpec {
    let json = r#"{
        "variables": [
            { "name": "w", "init": { "const": { "value": 0.0, "len": 1 } } },
            { "name": "b", "init": { "const": { "value": 0.0, "len": 1 } } }
        ],
        "optimizer": { "gradient_descent": { "step_size": 0.1 } },
        "seed": 3
    }"#;

    ServerSpec::from_json(json).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn workers_fit_a_linear_model() {
    let _ = env_logger::builder().is_test(true).try_init();

    let spec = server_spec();
    assert_eq!(
        spec.variables[0],
        VariableSpec {
            name: "w".into(),
            init: ParamGenSpec::Const { value: 0., len: 1 },
        }
    );
    assert_eq!(spec.optimizer, OptimizerSpec::GradientDescent { step_size: 0.1 });

    let pserver = ServerBuilder::new().build(&spec).unwrap();
    let handle = pserver.handle();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let server = CancellationToken::new();
    tokio::spawn(pserver.serve(listener, server.clone()));

    let config = WorkerConfig::new(
        NonZeroUsize::new(4).unwrap(),
        NonZeroUsize::new(2).unwrap(),
    );

    let tasks: Vec<_> = (0..2)
        .map(|id| {
            let url = url.clone();
            tokio::spawn(async move {
                let w = Variable::zeros("w", 1);
                let b = Variable::zeros("b", 1);
                let samples: Samples = (0..20)
                    .map(|i| {
                        let x = -1. + 0.1 * i as f64;
                        (x, 2. * x + 1.)
                    })
                    .collect();

                let mut worker = Worker::with_rng(
                    config,
                    Linear::new(w.clone(), b.clone()),
                    ParamClient::new(&url).unwrap(),
                    vec![w, b],
                    samples,
                    StdRng::seed_from_u64(id),
                );

                let cancel = CancellationToken::new();
                let stop = cancel.clone();
                let mut calls = 0;
                let mut observer =
                    |_next: &Subset<'_, Samples>, _last: Option<&Subset<'_, Samples>>| {
                        calls += 1;
                        if calls > 400 {
                            stop.cancel();
                        }
                    };

                worker
                    .run(Some(&mut observer), None, &cancel)
                    .await
                    .unwrap();

                worker.metrics().syncs
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), 200);
    }

    let params = handle.snapshot();
    assert!((params[0][0] - 2.).abs() < 1e-3, "w = {}", params[0][0]);
    assert!((params[1][0] - 1.).abs() < 1e-3, "b = {}", params[1][0]);

    server.cancel();
}
