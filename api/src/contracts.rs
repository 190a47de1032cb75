//! ABI of the two contracts the dashboard talks to.

use alloy::sol;

sol! {
    /// The LP token.
    #[sol(rpc)]
    interface IStakingToken {
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
    }

    /// The pool that holds stake and accrues rewards.
    #[sol(rpc)]
    interface IStakingPool {
        function stake(uint256 amount) external;
        function unstake(uint256 amount) external;
        function claimRewards() external;
        function getStaked(address account) external view returns (uint256);
        function getReward(address account) external view returns (uint256);
        function totalStaked() external view returns (uint256);
        function rewardRate() external view returns (uint256);
    }
}
