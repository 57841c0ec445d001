use StatPlots::{
    distributions::F::F,
    distributions::Normal::StdNormal,
    distributions::StudentT::StudentT,
    regions::{CriticalRegion, RegionKind, Verdict, grubbs_boundary},
};
use assert_approx_eq::assert_approx_eq;

#[test]
fn reported_boundary_wins_over_the_quantile() {
    let f_dist: F = F::new(2.0, 27.0).expect("Parameters should be valid");
    let region: CriticalRegion = CriticalRegion::upper_tail(Some(3.3541), &f_dist, 0.05);

    assert_eq!(region.kind(), RegionKind::UpperTail);
    assert_eq!(region.upper_boundary(), 3.3541);
    assert_eq!(region.lower_boundary(), None);
}

#[test]
fn absent_boundary_falls_back_to_the_quantile() {
    let f_dist: F = F::new(2.0, 27.0).expect("Parameters should be valid");
    let region: CriticalRegion = CriticalRegion::upper_tail(None, &f_dist, 0.05);

    // quantile(0.95) of F(2, 27)
    assert_approx_eq!(region.upper_boundary(), 3.3541, 1.0e-3);
}

#[test]
fn anova_statistic_past_the_boundary_is_critical() {
    let f_dist: F = F::new(2.0, 27.0).expect("Parameters should be valid");
    let region: CriticalRegion = CriticalRegion::upper_tail(Some(3.3541), &f_dist, 0.05);

    assert_eq!(region.classify(4.2), Verdict::InCriticalRegion);
    assert_eq!(region.classify(1.7), Verdict::Inside);
}

#[test]
fn upper_tail_boundary_itself_is_critical() {
    let region: CriticalRegion = CriticalRegion::UpperTail { boundary: 3.3541 };
    assert_eq!(region.classify(3.3541), Verdict::InCriticalRegion);
}

#[test]
fn modest_t_statistic_stays_inside_the_two_sided_region() {
    let t_dist: StudentT = StudentT::new(18.0).expect("Parameter should be valid");
    let region: CriticalRegion = CriticalRegion::two_sided(Some(2.1009), &t_dist, 0.05);

    assert_eq!(region.kind(), RegionKind::TwoSided);
    assert_eq!(region.lower_boundary(), Some(-2.1009));
    assert_eq!(region.classify(1.5), Verdict::Inside);
    assert_eq!(region.classify(-2.5), Verdict::InCriticalRegion);
    assert_eq!(region.classify(2.1009), Verdict::InCriticalRegion);
    assert_eq!(region.classify(-2.1009), Verdict::InCriticalRegion);
}

#[test]
fn two_sided_boundary_is_symmetric_even_for_negative_reports() {
    let t_dist: StudentT = StudentT::new(18.0).expect("Parameter should be valid");
    let region: CriticalRegion = CriticalRegion::two_sided(Some(-2.1009), &t_dist, 0.05);

    assert_eq!(region.upper_boundary(), 2.1009);
    assert_eq!(region.lower_boundary(), Some(-2.1009));
}

#[test]
fn two_sided_fallback_uses_half_the_significance() {
    let t_dist: StudentT = StudentT::new(18.0).expect("Parameter should be valid");
    let region: CriticalRegion = CriticalRegion::two_sided(None, &t_dist, 0.05);

    assert_approx_eq!(region.upper_boundary(), 2.1009, 1.0e-3);
}

#[test]
fn rank_sum_region_sits_around_its_expectation() {
    let region: CriticalRegion = CriticalRegion::two_sided_around(168.0, 20.49, 1.96);

    assert_approx_eq!(region.lower_boundary().expect("two sided"), 127.8396, 1.0e-9);
    assert_approx_eq!(region.upper_boundary(), 208.1604, 1.0e-9);
    assert_eq!(region.classify(141.5), Verdict::Inside);
}

#[test]
fn shapiro_region_rejects_small_w_only() {
    let region: CriticalRegion =
        CriticalRegion::scale_bounded(Some(0.905)).expect("a reported boundary yields a region");

    assert_eq!(region.kind(), RegionKind::ScaleBounded);
    assert_eq!(region.classify(0.91), Verdict::Inside);
    assert_eq!(region.classify(0.87), Verdict::InCriticalRegion);
    assert_eq!(region.classify(0.905), Verdict::InCriticalRegion);
}

#[test]
fn shapiro_region_needs_a_reported_boundary() {
    assert_eq!(CriticalRegion::scale_bounded(None), None);
}

#[test]
fn contradiction_is_flagged_only_when_the_report_disagrees() {
    let t_dist: StudentT = StudentT::new(18.0).expect("Parameter should be valid");
    let region: CriticalRegion = CriticalRegion::two_sided(Some(2.1009), &t_dist, 0.05);

    // statistic inside, report also accepts: no contradiction
    assert!(!region.contradicts_reported(1.5, Some(false)));
    // statistic inside, report claims rejection: contradiction
    assert!(region.contradicts_reported(1.5, Some(true)));
    // statistic critical, report rejects: no contradiction
    assert!(!region.contradicts_reported(3.0, Some(true)));
    // a silent report can not contradict anything
    assert!(!region.contradicts_reported(3.0, None));
}

#[test]
fn grubbs_boundary_matches_the_published_table() {
    // two sided critical values at alpha = 0.05
    let g_20: f64 = grubbs_boundary(20, 0.05).expect("n = 20 is plenty");
    assert_approx_eq!(g_20, 2.708, 1.0e-2);

    let g_10: f64 = grubbs_boundary(10, 0.05).expect("n = 10 is plenty");
    assert_approx_eq!(g_10, 2.290, 1.0e-2);
}

#[test]
fn grubbs_boundary_grows_with_the_sample() {
    let small: f64 = grubbs_boundary(8, 0.05).expect("n = 8 is enough");
    let large: f64 = grubbs_boundary(50, 0.05).expect("n = 50 is plenty");
    assert!(small < large);
}

#[test]
fn grubbs_boundary_rejects_tiny_samples() {
    // n = 2 leaves zero degrees of freedom
    assert!(grubbs_boundary(2, 0.05).is_err());
}

#[test]
fn z_boundary_agrees_with_the_std_normal_quantile() {
    let std_normal: StdNormal = StdNormal::new();
    let region: CriticalRegion = CriticalRegion::two_sided(None, &std_normal, 0.05);

    assert_approx_eq!(region.upper_boundary(), 1.95996, 1.0e-3);
}
