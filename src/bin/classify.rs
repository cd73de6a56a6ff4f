use rusty_tree::data::Dataset;
use rusty_tree::metrics::ClassificationMetrics;
use rusty_tree::trees::{Cart, DecisionTreeClassifier, Id3, SplitCriterion, C45};
use std::env;
use std::error::Error;

const DEFAULT_PATH: &str = "datasets/weather.csv";
const DEFAULT_TARGET: &str = "play";

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, default: T) -> Result<T, Box<dyn Error>>
where
    T::Err: Error + 'static,
{
    match arg {
        Some(arg) => Ok(arg.parse::<T>()?),
        None => Ok(default),
    }
}

fn report<C: SplitCriterion>(
    name: &str,
    classifier: &DecisionTreeClassifier<C>,
    test_dataset: &Dataset,
) -> Result<String, Box<dyn Error>> {
    let tree = classifier.tree().ok_or("Tree wasn't built yet.")?;
    let predictions = classifier.predict_batch(test_dataset.rows())?;
    let labels = test_dataset.labels();

    let mut summary = format!(
        "{} ({} nodes, {} leaves, depth {})\n{}",
        name,
        tree.node_count(),
        tree.leaf_count(),
        tree.depth(),
        tree
    );
    summary.push_str(&format!(
        "Accuracy: {:.2}%\n",
        classifier.accuracy(&labels, &predictions)? * 100.0
    ));
    match classifier.f1_score(&labels, &predictions) {
        Ok(f1) => summary.push_str(&format!("F1 score: {:.3}\n", f1)),
        Err(err) => summary.push_str(&format!("F1 score: {}\n", err)),
    }
    Ok(summary)
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_PATH);
    let target = args.get(2).map(String::as_str).unwrap_or(DEFAULT_TARGET);
    let train_fraction = parse_arg(args.get(3), 0.7)?;
    let alpha = parse_arg(args.get(4), 0.5)?;

    let dataset = Dataset::from_csv(path, target)?;
    println!("Loaded {} rows from {}", dataset.len(), path);

    let attributes = dataset.attributes();
    let (train_dataset, test_dataset) = dataset.train_test_split(train_fraction, Some(42))?;
    let (grow_dataset, validation_dataset) = train_dataset.train_test_split(0.75, Some(7))?;

    let mut id3 = Id3::new();
    println!("{}", id3.fit(&train_dataset, &attributes)?);
    println!("{}", report("ID3", &id3, &test_dataset)?);

    let mut c45 = C45::new();
    c45.fit(&grow_dataset, &attributes)?;
    let collapsed = c45.prune(&validation_dataset, None)?;
    println!("Pessimistic pruning collapsed {} subtrees", collapsed);
    println!("{}", report("C4.5", &c45, &test_dataset)?);

    let mut cart = Cart::default();
    cart.fit(&grow_dataset, &attributes)?;
    let collapsed = cart.prune(&validation_dataset, Some(alpha))?;
    println!("Cost-complexity pruning (alpha {}) collapsed {} subtrees", alpha, collapsed);
    println!("{}", report("CART", &cart, &test_dataset)?);

    Ok(())
}

fn main() {
    let args = env::args().collect::<Vec<_>>();
    if let Err(err) = run(&args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
