use crate::rules;
use crate::{Config, Pipeline};

#[test]
fn pipeline_examples() {
    // Array of (input, expected output)
    let cases: Vec<(&str, &str)> = vec![
        ("", ""),
        ("x+y", "x+y"),
        // operators
        (r"\lim a_n", r"\lim{a_n}"),
        (r"\lim_{n\to\infty} a_n", r"\lim_{n\to\infty}{a_n}"),
        (r"\lim (x_n+1)", r"\lim (x_n+1)"),
        (r"\lim_{n \to \max x} a_n", r"\lim_{n \to \max{x}}{a_n}"),
        (r"\lim_{x\to0}\, f(x)", r"\lim_{x\to0}\,{f}(x)"),
        (r"\max \{a,b\}", r"\max \{a,b\}"),
        (r"\sup_{x\in A} f(x)", r"\sup_{x\in A}{f}(x)"),
        (r"\argmin_\theta L", r"\argmin_\theta{L}"),
        // isolated symbol
        (r"x^\circ", r"x^\circ"),
        (r"(^\circ)", r"(\degree)"),
        (r"T = 25 ^\circ C", r"T = 25 ^\circ C"),
        // decorations
        (r"\bar{}", r"\bar{\phantom{x}}"),
        (r"\vec{} + \hat{a}", r"\vec{\phantom{x}} + \hat{a}"),
        // trailing Greek letter
        (r"...\theta", r"...{\theta}"),
        (r"\lim \theta", r"\lim{\theta}"),
        (r"\cos\phi", r"\cos{\phi}"),
        // aliases
        (r"\tfrac{a}{b}", r"\frac{a}{b}"),
        (r"\dfrac{1}{2}\qed", r"\frac{1}{2}\blacksquare"),
        // modulo
        (r"a\equiv b \pmod{m}", r"a\equiv b \ (\text{mod}\ m)"),
        (r"7 \bmod 3", r"7 \ \text{mod}\  3"),
        // environments
        (r"\begin{pmatrix}a&b\\c&d\end{pmatrix}", r"\left(\begin{matrix}a&b\\c&d\end{matrix}\right)"),
        (r"\begin{bmatrix}1&0\\0&1\end{bmatrix}", r"\left[\begin{matrix}1&0\\0&1\end{matrix}\right]"),
        (r"\begin{vmatrix}a\end{vmatrix}", r"\left|\begin{matrix}a\end{matrix}\right|"),
        (
            r"|x|=\begin{cases}x&x\ge0\\-x&x<0\end{cases}",
            r"|x|=\left\{\begin{matrix}x&x\ge0\\-x&x<0\end{matrix}\right.",
        ),
        // combinations
        (
            r"\max \begin{pmatrix}\tfrac{1}{2}&\bar{}\end{pmatrix}",
            r"\max \left(\begin{matrix}\frac{1}{2}&\bar{\phantom{x}}\end{matrix}\right)",
        ),
        (r"\lim_{x\to0} \tfrac{\sin x}{x}", r"\lim_{x\to0}{\frac{\sin x}{x}}"),
        // malformed input is passed through
        (r"\frac{a}{", r"\frac{a}{"),
        (r"\lim a_{n", r"\lim a_{n"),
        (r"\begin{pmatrix}a", r"\begin{pmatrix}a"),
        (r"}{)(][\\", r"}{)(][\\"),
    ];

    let pipeline = Pipeline::new(Config::default());

    for (input, expected) in cases {
        let output = pipeline.run(input);
        assert_eq!(output, expected, "input: {input:?}");
    }
}

#[test]
fn rules_run_in_the_documented_order() {
    let names: Vec<&str> = rules::get().iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![
            "operator argument grouping",
            "isolated degree symbol",
            "empty decoration placeholder",
            "trailing letter command",
            "command aliases",
            "modulo annotation",
            "bracketed matrix environments",
            "piecewise cases",
        ]
    );
}

#[test]
fn already_normalized_output_is_stable() {
    let pipeline = Pipeline::new(Config::default());
    for input in [
        r"\lim_{n\to\infty} a_n",
        r"\max \min x",
        r"(^\circ) + x^\circ",
        r"\bar{} \tilde{}",
        r"\sin\theta",
        r"\begin{pmatrix}\begin{bmatrix}a\end{bmatrix}\end{pmatrix}",
        r"\begin{cases}\tfrac12 & \pmod{p}\end{cases}",
    ] {
        let once = pipeline.run(input);
        let twice = pipeline.run(&once);
        assert_eq!(once, twice, "input: {input:?}");
    }
}
